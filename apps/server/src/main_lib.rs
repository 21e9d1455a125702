use std::sync::Arc;

use crate::config::{Config, LogFormat};
use spotfix_core::{MarketDataClient, SpotServiceTrait};
use spotfix_market_data::MarketDataProvider;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub spot_service: Arc<dyn SpotServiceTrait>,
    pub provider_id: &'static str,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = MarketDataClient::new(&config.spot).await?;
    Ok(state_from_client(client, config))
}

/// Build the state around an existing provider instead of Yahoo.
pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let client = MarketDataClient::with_provider(provider, &config.spot)?;
    Ok(state_from_client(client, config))
}

fn state_from_client(client: MarketDataClient, config: &Config) -> Arc<AppState> {
    let provider_id = client.provider().id();
    tracing::info!(
        "Spot service ready: provider {}, window ±{} days, {} fetch",
        provider_id,
        config.spot.window_days,
        config.spot.fetch_mode
    );
    Arc::new(AppState {
        spot_service: Arc::new(client.spot_service(&config.spot)),
        provider_id,
    })
}
