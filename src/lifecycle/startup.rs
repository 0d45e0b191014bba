//! Startup orchestration.
//!
//! Fail fast: any error before the listener is bound is fatal.

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config_or_default, ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};
use crate::store::{build_store, StoreError};

/// Errors that abort startup or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("object store: {0}")]
    Store(#[from] StoreError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Load `.env` and configuration, then serve until SIGINT/SIGTERM.
pub async fn run(config_path: Option<&Path>) -> Result<(), StartupError> {
    let dotenv = dotenvy::dotenv();
    let config = load_config_or_default(config_path)?;

    logging::init_logging(&config.observability.log_level);
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "xml-audit-gateway starting");

    serve(config, Shutdown::default(), true).await
}

/// Serve with an already validated configuration.
///
/// When `handle_signals` is set, SIGINT/SIGTERM trigger `shutdown`.
pub async fn serve(config: GatewayConfig, shutdown: Shutdown, handle_signals: bool) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_backend = ?config.store.backend,
        bucket = %config.store.bucket,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = build_store(&config.store)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    let server_shutdown = shutdown.subscribe();
    if handle_signals {
        shutdown.trigger_on_signal();
    }

    let server = HttpServer::new(config, store);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
