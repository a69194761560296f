//! Integration tests for Bakehouse.
//!
//! Each test spins up the real axum server on an ephemeral port, backed by
//! its own in-memory `SQLite` database, and exercises it over HTTP with
//! `reqwest`. Tests are fully isolated from each other and need no external
//! services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bakehouse-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use reqwest::Client;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use bakehouse_server::app;
use bakehouse_server::config::ServerConfig;
use bakehouse_server::state::AppState;

/// A running server instance plus the handles tests need to drive it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
}

impl TestContext {
    /// Start a fresh server on an ephemeral port over an in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database, migrations, or listener cannot be set up;
    /// tests cannot proceed without them.
    pub async fn new() -> Self {
        // A single connection so every query sees the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect to in-memory sqlite");

        sqlx::migrate!("../server/migrations")
            .run(&pool)
            .await
            .expect("run migrations");

        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().expect("parse host"),
            port: 0,
        };
        let state = AppState::new(config, pool.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            pool,
        }
    }

    /// Build a full URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Insert a bakery directly (the API exposes no bakery create endpoint).
    pub async fn seed_bakery(&self, name: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO bakeries (name, created_at) VALUES (?, ?) RETURNING id")
            .bind(name)
            .bind(chrono::Utc::now())
            .fetch_one(&self.pool)
            .await
            .expect("insert bakery")
    }

    /// Count baked good rows, for verifying that failed requests insert nothing.
    pub async fn baked_good_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM baked_goods")
            .fetch_one(&self.pool)
            .await
            .expect("count baked goods")
    }
}
