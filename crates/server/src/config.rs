//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BAKEHOUSE_DATABASE_URL` - `SQLite` connection string (e.g.,
//!   `sqlite:bakehouse.db`); falls back to `DATABASE_URL`
//!
//! ## Optional
//! - `BAKEHOUSE_HOST` - Bind address (default: 127.0.0.1)
//! - `BAKEHOUSE_PORT` - Listen port (default: 5555)
//! - `RUST_LOG` - Log filter (default: `bakehouse_server=info,tower_http=debug`)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BAKEHOUSE_DATABASE_URL")?;
        let host = get_env_or_default("BAKEHOUSE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAKEHOUSE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BAKEHOUSE_PORT", "5555")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAKEHOUSE_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., BAKEHOUSE_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
