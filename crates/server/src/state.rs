//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration. It replaces
/// any notion of a module-level database handle: handlers receive it
/// explicitly through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }
}
