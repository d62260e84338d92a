//! Relay dispatch process entry point.
//!
//! Loads configuration from the environment (and an optional `.env` file),
//! installs structured logging, starts the background jobs, and runs until
//! interrupted.

use std::sync::Arc;

use relay_dispatch::{
    app::RelayDispatchApp, config::RelayDispatchConfig,
    relay::adapters::rest::RestSiteConfigSource,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "relay_dispatch=info";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = dotenv {
        tracing::debug!(error = %err, "no .env file loaded");
    }

    let config = RelayDispatchConfig::from_env()?;
    tracing::info!(
        site = %config.site_name,
        rest_api_url = %config.rest_api_url,
        ttl_seconds = config.queue_policy.ttl().num_seconds(),
        max_pending_tasks = config.queue_policy.max_pending_tasks_per_relay(),
        "loaded relay dispatch configuration"
    );

    let source = Arc::new(RestSiteConfigSource::new(config.site_connection())?);
    let mut app = RelayDispatchApp::new(&config, source);
    app.start(config.relays_supported);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    app.shutdown();
    Ok(())
}
