//! Bakehouse API server.
//!
//! This binary serves the bakery CRUD API on port 5555.
//!
//! # Architecture
//!
//! - Axum web framework, JSON responses, form-encoded request bodies
//! - `SQLite` via sqlx for persistence (two tables: bakeries, baked goods)
//! - Explicit application state (config + connection pool), no globals

#![cfg_attr(not(test), forbid(unsafe_code))]

use bakehouse_server::config::ServerConfig;
use bakehouse_server::state::AppState;
use bakehouse_server::{app, db};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bakehouse_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p bakehouse-cli -- migrate

    // Build application state
    let state = AppState::new(config.clone(), pool);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("bakehouse listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
