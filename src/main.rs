//! parksys-assets server entry point.
//!
//! Starts the reference asset backend over HTTP.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use parksys_assets::app_state::AppState;
use parksys_assets::config::ServerConfig;
use parksys_assets::server::{self, AssetStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(addr = %config.listen_addr, "starting parksys-assets");

    let store = Arc::new(AssetStore::new());
    if config.seed_demo_data {
        server::seed_demo_data(&store)
            .await
            .context("seeding demo data")?;
    }

    let app = server::app(AppState::new(store), config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
