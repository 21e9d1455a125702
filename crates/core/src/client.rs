//! Market Data Client - Facade for the market-data crate.
//!
//! Wires a provider, the resolver chain and the fixing fetcher together from
//! [`SpotSettings`], so callers only deal with a ready [`SpotService`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        MarketDataClient                             │
//! │                                                                     │
//! │  SpotSettings ─┬─▶ AliasTable (embedded or file)                    │
//! │                │          │                                         │
//! │                │          ▼                                         │
//! │                ├─▶ ResolverChain (alias, probe, [search])           │
//! │                │          │                                         │
//! │                └─▶ FixingFetcher (window, retry, cache, mode)       │
//! │                           │                                         │
//! │                           ▼                                         │
//! │                      SpotService                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use log::{info, warn};

use spotfix_market_data::{
    AliasTable, MarketDataProvider, ProviderValidator, ResolverChain, SearchResolver,
    YahooProvider,
};

use crate::errors::{Error, Result};
use crate::fixings::FixingFetcher;
use crate::report::SpotService;
use crate::settings::SpotSettings;

pub struct MarketDataClient {
    provider: Arc<dyn MarketDataProvider>,
    resolver: Arc<ResolverChain>,
    fetcher: Arc<FixingFetcher>,
}

impl MarketDataClient {
    /// Create a client backed by Yahoo Finance.
    pub async fn new(settings: &SpotSettings) -> Result<Self> {
        let provider = YahooProvider::new().await?;
        info!("Initialized market data provider: {}", provider.id());
        Self::with_provider(Arc::new(provider), settings)
    }

    /// Create a client around an existing provider.
    pub fn with_provider(
        provider: Arc<dyn MarketDataProvider>,
        settings: &SpotSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let aliases = load_alias_table(settings)?;
        let validator = Arc::new(ProviderValidator::new(provider.clone()));
        let mut resolver = ResolverChain::new(aliases, validator);

        if settings.search_fallback {
            if provider.capabilities().supports_search {
                resolver.add_resolver(Box::new(SearchResolver::new(provider.clone())));
            } else {
                warn!(
                    "Search fallback requested but {} does not support search",
                    provider.id()
                );
            }
        }

        let fetcher = Arc::new(FixingFetcher::new(provider.clone(), settings));

        Ok(Self {
            provider,
            resolver: Arc::new(resolver),
            fetcher,
        })
    }

    pub fn provider(&self) -> Arc<dyn MarketDataProvider> {
        self.provider.clone()
    }

    pub fn resolver(&self) -> Arc<ResolverChain> {
        self.resolver.clone()
    }

    /// Build the spot service on top of this client.
    pub fn spot_service(&self, settings: &SpotSettings) -> SpotService {
        SpotService::new(
            self.resolver.clone(),
            self.fetcher.clone(),
            settings.default_policy,
        )
    }
}

fn load_alias_table(settings: &SpotSettings) -> Result<Arc<AliasTable>> {
    match settings.alias_table_path.as_deref() {
        Some(path) => {
            let table = AliasTable::from_path(path)?;
            if table.is_empty() {
                return Err(Error::InvalidConfigValue(format!(
                    "alias table {} has no entries",
                    path
                )));
            }
            info!("Loaded {} aliases from {}", table.len(), path);
            Ok(Arc::new(table))
        }
        None => Ok(AliasTable::embedded()),
    }
}
