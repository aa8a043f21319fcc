//! ReplyFlow API - Main Entry Point

use replyflow_api::{build_router, ApiConfig, ApiState};
use replyflow_core::AutomationRegistry;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ReplyFlow API v{}", env!("CARGO_PKG_VERSION"));

    // Load config
    let config_path = std::env::var("REPLYFLOW_CONFIG")
        .unwrap_or_else(|_| "/etc/replyflow/api.json".into());

    let config = ApiConfig::load(&config_path)
        .unwrap_or_else(|e| {
            tracing::warn!(path = %config_path, error = %e, "Config not loaded, using defaults");
            ApiConfig::default()
        })
        .with_env_overrides();

    if config.webhook_verify_token.is_none() {
        tracing::warn!("No webhook verify token configured; Instagram handshakes will be rejected");
    }

    let registry = if config.seed_sample_data {
        AutomationRegistry::with_sample_data()
    } else {
        AutomationRegistry::new()
    };
    tracing::info!(automations = registry.len(), "Registry ready");

    let bind_addr = config.bind_addr.clone();
    let app = build_router(ApiState::new(config, Arc::new(registry)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("API listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
