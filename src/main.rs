use std::sync::Arc;
use tracing::{info, warn};

use docscan::{config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docscan=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: {:?}", config);

    if config.upstage_api_key.is_none() {
        warn!("UPSTAGE_API_KEY is not set; OCR calls will fail and correction will be skipped");
    }

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    let state = Arc::new(AppState::new(config));
    axum::serve(listener, docscan::app(state)).await?;

    Ok(())
}
