//! Probe resolver - accepts short raw tickers the provider can describe.
//!
//! An input is only probed when it looks like a ticker: at most
//! [`MAX_PROBE_LEN`] characters and no whitespace. The probe itself is a
//! profile lookup; a symbol is valid when the provider returns a descriptive
//! name longer than two characters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::provider::MarketDataProvider;

use super::traits::{ResolutionSource, ResolvedSymbol, Resolver};

/// Longest input still treated as a candidate ticker.
pub const MAX_PROBE_LEN: usize = 10;

/// Answers whether a symbol is a tradable instrument known to the provider.
///
/// Implementations must not fail: any provider error is reported as `false`.
#[async_trait]
pub trait SymbolValidator: Send + Sync {
    async fn is_valid_symbol(&self, symbol: &str) -> bool;
}

/// Validator backed by a market data provider's profile lookup.
pub struct ProviderValidator {
    provider: Arc<dyn MarketDataProvider>,
}

impl ProviderValidator {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SymbolValidator for ProviderValidator {
    async fn is_valid_symbol(&self, symbol: &str) -> bool {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return false;
        }

        match self.provider.get_profile(symbol).await {
            Ok(profile) => profile.has_display_name(),
            Err(e) => {
                warn!(
                    "Validation probe for '{}' failed on {}: {}",
                    symbol,
                    self.provider.id(),
                    e
                );
                false
            }
        }
    }
}

/// Whether a normalised query looks like a raw ticker worth probing.
pub fn is_probe_candidate(query: &str) -> bool {
    !query.is_empty()
        && query.chars().count() <= MAX_PROBE_LEN
        && !query.chars().any(char::is_whitespace)
}

/// Resolves short ticker-shaped inputs that pass the validation probe.
pub struct ProbeResolver {
    validator: Arc<dyn SymbolValidator>,
}

impl ProbeResolver {
    pub fn new(validator: Arc<dyn SymbolValidator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl Resolver for ProbeResolver {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Probe
    }

    async fn try_resolve(&self, query: &str) -> Option<ResolvedSymbol> {
        if !is_probe_candidate(query) {
            return None;
        }

        if self.validator.is_valid_symbol(query).await {
            Some(ResolvedSymbol {
                symbol: Arc::from(query),
                source: ResolutionSource::Probe,
            })
        } else {
            debug!("Probe rejected '{}'", query);
            None
        }
    }
}
