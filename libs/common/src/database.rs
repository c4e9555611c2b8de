//! Database module for handling MongoDB connections and operations
//!
//! This module provides client configuration, startup connectivity checks,
//! and the deadline helper every repository call runs under.

use crate::error::{DatabaseError, DatabaseResult};
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::{env, future::IntoFuture, time::Duration};
use tracing::{error, info};

/// Default database name when `DB_NAME` is not set
pub const DEFAULT_DATABASE_NAME: &str = "todo_db";

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Name of the database holding the collections
    pub database_name: String,
    /// Deadline for the startup connection and ping
    pub connect_timeout: Duration,
    /// Deadline for each individual operation
    pub operation_timeout: Duration,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGODB_URI`: MongoDB connection string (required)
    /// - `DB_NAME`: Database name (default: "todo_db")
    /// - `DATABASE_CONNECT_TIMEOUT`: Startup timeout in seconds (default: 10)
    /// - `DATABASE_OPERATION_TIMEOUT`: Per-operation timeout in seconds (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let uri = env::var("MONGODB_URI")
            .ok()
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| {
                DatabaseError::Configuration("MONGODB_URI environment variable not set".to_string())
            })?;

        let database_name = env::var("DB_NAME")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let connect_timeout = env::var("DATABASE_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let operation_timeout = env::var("DATABASE_OPERATION_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            uri,
            database_name,
            connect_timeout: Duration::from_secs(connect_timeout),
            operation_timeout: Duration::from_secs(operation_timeout),
        })
    }
}

/// Connect to MongoDB and verify the server answers a ping
///
/// The whole sequence runs under `config.connect_timeout`. Any failure here is
/// meant to be fatal to the caller.
pub async fn init_client(config: &DatabaseConfig) -> DatabaseResult<Client> {
    info!("Initializing MongoDB client");

    let connect = async {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| DatabaseError::Configuration(format!("Invalid MongoDB URI: {}", e)))?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client = Client::with_options(options).map_err(DatabaseError::Connection)?;
        ping(&client.database(&config.database_name))
            .await
            .map_err(DatabaseError::Connection)?;

        Ok::<_, DatabaseError>(client)
    };

    let client = with_timeout(config.connect_timeout, connect).await?;
    info!("Connected to MongoDB database {}", config.database_name);
    Ok(client)
}

async fn ping(database: &Database) -> Result<(), mongodb::error::Error> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Check database connectivity
///
/// # Returns
/// * `DatabaseResult<bool>` - True if the server answered the ping
pub async fn health_check(database: &Database) -> DatabaseResult<bool> {
    match ping(database).await {
        Ok(()) => Ok(true),
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

/// Run a database future under a deadline
///
/// Accepts driver actions directly since they implement `IntoFuture`. Driver
/// errors are converted through `From<mongodb::error::Error>`, so a unique
/// index violation comes back as `DatabaseError::Duplicate`.
pub async fn with_timeout<T, E, F>(deadline: Duration, operation: F) -> DatabaseResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Into<DatabaseError>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(DatabaseError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var("MONGODB_URI");
            env::remove_var("DB_NAME");
            env::remove_var("DATABASE_CONNECT_TIMEOUT");
            env::remove_var("DATABASE_OPERATION_TIMEOUT");
        }
    }

    #[test]
    #[serial]
    fn test_database_config_requires_uri() {
        clear_env();

        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_database_config_defaults() {
        clear_env();
        unsafe {
            env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "todo_db");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.operation_timeout, Duration::from_secs(5));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_database_config_custom_values() {
        clear_env();
        unsafe {
            env::set_var("MONGODB_URI", "mongodb://db:27017");
            env::set_var("DB_NAME", "todos_test");
            env::set_var("DATABASE_CONNECT_TIMEOUT", "3");
            env::set_var("DATABASE_OPERATION_TIMEOUT", "1");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_name, "todos_test");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.operation_timeout, Duration::from_secs(1));

        clear_env();
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DatabaseError>(())
        };

        let result = with_timeout(Duration::from_millis(10), slow).await;
        assert!(matches!(result, Err(DatabaseError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_value_through() {
        let fast = async { Ok::<_, DatabaseError>(42) };

        let result = with_timeout(Duration::from_secs(1), fast).await.unwrap();
        assert_eq!(result, 42);
    }
}
