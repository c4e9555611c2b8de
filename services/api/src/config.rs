//! Service configuration loaded from the environment

use anyhow::{Context, Result};
use axum::http::HeaderValue;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";

/// Default frontend origin allowed by CORS
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the listener binds to
    pub bind_address: String,
    /// The single origin allowed to make cross-origin requests
    pub cors_allowed_origin: HeaderValue,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: Listen address (default: "0.0.0.0:3001")
    /// - `CORS_ALLOWED_ORIGIN`: Allowed frontend origin (default: "http://localhost:5173")
    pub fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
        let cors_allowed_origin = HeaderValue::from_str(origin.trim_end_matches('/'))
            .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN: {origin}"))?;

        Ok(AppConfig {
            bind_address,
            cors_allowed_origin,
        })
    }
}
