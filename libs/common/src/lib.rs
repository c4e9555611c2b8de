//! Common library for the todo services
//!
//! This crate provides the persistence-layer plumbing shared by services:
//! MongoDB client bootstrap, per-operation deadlines, and the database
//! error type.

pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, health_check, init_client};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let client = init_client(&config).await?;
///     let is_healthy = health_check(&client.database(&config.database_name)).await?;
///     println!("Database health check: {}", is_healthy);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
