use anyhow::{Context, Result};
use stylecast::{AppState, StylecastConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = StylecastConfig::from_env().context("Failed to load configuration")?;
    let _telemetry = telemetry::init(&config.logging)?;

    tracing::info!("Starting Stylecast {}", stylecast::VERSION);
    let state = AppState::from_config(&config)?;
    web::run(&config, state).await
}
