//! companion-gateway server entry point.
//!
//! Starts the Axum HTTP server with the admin REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use companion_gateway::app_state::AppState;
use companion_gateway::config::{GatewayConfig, LogFormat};
use companion_gateway::domain::{ConnectionRegistry, spawn_heartbeat};
use companion_gateway::server::build_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting companion-gateway");

    // Build domain layer
    let registry = Arc::new(ConnectionRegistry::new());
    let heartbeat = config.heartbeat_interval().map(|interval| {
        tracing::info!(interval_secs = interval.as_secs(), "heartbeat enabled");
        spawn_heartbeat(Arc::clone(&registry), interval)
    });

    // Build application
    let app_state = AppState::new(registry, config.connection_buffer);
    let app = build_app(app_state, config.request_timeout());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(heartbeat) = heartbeat {
        heartbeat.abort();
    }
    tracing::info!("companion-gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
