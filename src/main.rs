//! Mirage server: a small social network backend.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use mirage_api::{AppState, build_app};
use mirage_core::config::AppConfig;
use mirage_core::error::AppError;
use mirage_database::Repositories;

#[tokio::main]
async fn main() {
    let env = std::env::var("MIRAGE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Mirage v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(provider = %config.database.provider, "Connecting repositories...");
    let repositories = Repositories::connect(&config.database).await?;

    tracing::info!(provider = %config.storage.provider, "Initializing storage...");
    let storage = mirage_storage::connect(&config.storage).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repositories.clone(), storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Mirage server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    tracing::info!("Shutting down");
    repositories.close().await;
    served
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
