//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bakehouse-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BAKEHOUSE_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded into
//! the binary at compile time.

use secrecy::SecretString;
use thiserror::Error;

use bakehouse_server::db;

/// Errors that can occur while running migrations.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run database migrations.
///
/// # Errors
///
/// Returns `MigrateError` if the database URL is missing, the connection
/// fails, or a migration cannot be applied.
pub async fn run() -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Read the database URL, preferring `BAKEHOUSE_DATABASE_URL`.
pub(crate) fn database_url_from_env() -> Result<SecretString, MigrateError> {
    std::env::var("BAKEHOUSE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrateError::MissingEnvVar("BAKEHOUSE_DATABASE_URL"))
}
