//! Atlas Daemon - query routing assistant
//!
//! Routes free-text queries to the weather, remote fact or math handler and
//! serves the results over HTTP.

use anyhow::{Context, Result};
use atlas_common::{AtlasConfig, Dispatcher};
use atlasd::server::{self, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Atlas Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AtlasConfig::load();
    if !config.weather_settings().has_api_key() {
        warn!("  No OpenWeather API key configured, weather queries will report a provider error");
    }

    // The blocking HTTP client must not be created on a runtime thread
    let dispatcher = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || Dispatcher::from_config(&config))
            .await
            .context("Dispatcher setup task failed")?
            .context("Failed to build dispatcher")?
    };

    info!("Atlas Daemon ready");
    server::run(AppState::new(dispatcher), &config.server.bind).await?;

    info!("Atlas Daemon stopped");
    Ok(())
}
