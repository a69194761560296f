//! Database operations for the bakehouse SQLite store.
//!
//! ## Tables
//!
//! - `bakeries` - Bakery records (name update only through the API)
//! - `baked_goods` - Baked good records, one bakery each (full CRUD)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p bakehouse-cli -- migrate
//! ```

pub mod baked_goods;
pub mod bakeries;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use baked_goods::{BakedGoodPatch, BakedGoodRepository, NewBakedGood};
pub use bakeries::BakeryRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a dangling bakery reference).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing, and foreign-key enforcement is
/// enabled so `baked_goods.bakery_id` always references an existing bakery.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
