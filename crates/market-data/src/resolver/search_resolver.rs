//! Search resolver - best-effort free-text lookup through the provider.
//!
//! Runs last in the chain and only when enabled. The first hit that is a
//! usable underlying (see [`SearchResult::is_underlying_candidate`]) wins;
//! provider ranking is trusted as-is.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::SearchResult;
use crate::provider::MarketDataProvider;

use super::traits::{ResolutionSource, ResolvedSymbol, Resolver};

pub struct SearchResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl SearchResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Resolver for SearchResolver {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Search
    }

    async fn try_resolve(&self, query: &str) -> Option<ResolvedSymbol> {
        if query.is_empty() || !self.provider.capabilities().supports_search {
            return None;
        }

        let results = match self.provider.search(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search for '{}' failed on {}: {}", query, self.provider.id(), e);
                return None;
            }
        };

        let hit = results
            .iter()
            .find(|r| r.is_underlying_candidate())
            .map(|r: &SearchResult| r.symbol.trim().to_uppercase())?;

        debug!("Search matched '{}' to {}", query, hit);
        Some(ResolvedSymbol {
            symbol: Arc::from(hit),
            source: ResolutionSource::Search,
        })
    }
}
