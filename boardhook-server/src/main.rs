use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use boardhook_relay::{Relay, RelayConfig};
use boardhook_server::api;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardhook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting boardhook relay...");

    let config_path =
        std::env::var("BOARDHOOK_CONFIG").unwrap_or_else(|_| "boardhook.toml".to_string());
    let config = RelayConfig::load(Path::new(&config_path))
        .with_context(|| format!("failed to load configuration from {config_path}"))?;
    tracing::info!(
        transitions = config.transitions.len(),
        "Configuration loaded"
    );

    let relay = Relay::new(config).context("failed to build relay")?;
    let app = api::create_router(Arc::new(relay));

    let addr = std::env::var("BOARDHOOK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
