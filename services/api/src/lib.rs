//! Multi-user todo API
//!
//! Users register and log in to obtain a bearer token, then manage their own
//! todos. Every todo read or write is filtered by the authenticated owner.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
