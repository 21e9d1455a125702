//! Resolver chain - composite resolver that tries strategies in order.
//!
//! The resolver chain is the main entry point for symbol resolution. It
//! normalises the input once and hands it to each strategy until one
//! succeeds.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ProviderSymbol;

use super::alias_resolver::AliasResolver;
use super::alias_table::AliasTable;
use super::probe_resolver::{ProbeResolver, SymbolValidator};
use super::traits::{normalize_query, ResolutionSource, Resolver, SymbolResolver};

/// Outcome of resolving one user input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The input as entered, trimmed.
    pub input: String,
    /// Resolved symbol, or the uppercased input when nothing matched.
    pub symbol: ProviderSymbol,
    /// Whether a strategy accepted the input.
    pub was_resolved: bool,
    /// Which strategy accepted it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ResolutionSource>,
}

impl Resolution {
    /// A successful resolution.
    pub fn resolved(input: &str, symbol: ProviderSymbol, source: ResolutionSource) -> Self {
        Self {
            input: input.trim().to_string(),
            symbol,
            was_resolved: true,
            source: Some(source),
        }
    }

    /// A failed resolution: the normalised input stands in as the symbol.
    pub fn unresolved(input: &str) -> Self {
        Self {
            input: input.trim().to_string(),
            symbol: Arc::from(normalize_query(input)),
            was_resolved: false,
            source: None,
        }
    }
}

/// Composite resolver that tries multiple strategies in order.
///
/// The default order is:
/// 1. Alias table (exact name lookup)
/// 2. Validation probe (heuristic raw ticker)
///
/// Further strategies (e.g., [`SearchResolver`](super::SearchResolver)) are
/// appended with [`add_resolver`](Self::add_resolver) and run after the
/// existing ones.
///
/// # Example
///
/// ```ignore
/// let chain = ResolverChain::new(AliasTable::embedded(), validator);
///
/// let resolution = chain.resolve("bnp paribas").await;
/// // resolution.symbol = "BNP.PA"
/// // resolution.source = Some(ResolutionSource::Alias)
/// ```
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    /// Create a new ResolverChain with the default strategy order.
    pub fn new(aliases: Arc<AliasTable>, validator: Arc<dyn SymbolValidator>) -> Self {
        Self {
            resolvers: vec![
                Box::new(AliasResolver::new(aliases)),
                Box::new(ProbeResolver::new(validator)),
            ],
        }
    }

    /// Create a chain with no strategies; every input is unresolved until
    /// strategies are added.
    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Append a strategy to the end of the chain.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Builder-style variant of [`add_resolver`](Self::add_resolver).
    pub fn with_resolver(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.add_resolver(resolver);
        self
    }

    /// Sources of the configured strategies, in order.
    pub fn sources(&self) -> Vec<ResolutionSource> {
        self.resolvers.iter().map(|r| r.source()).collect()
    }
}

#[async_trait]
impl SymbolResolver for ResolverChain {
    async fn resolve(&self, name_or_ticker: &str) -> Resolution {
        let query = normalize_query(name_or_ticker);
        if query.is_empty() {
            return Resolution::unresolved(name_or_ticker);
        }

        for resolver in &self.resolvers {
            if let Some(resolved) = resolver.try_resolve(&query).await {
                debug!(
                    "Resolved '{}' to {} via {:?}",
                    query, resolved.symbol, resolved.source
                );
                return Resolution::resolved(name_or_ticker, resolved.symbol, resolved.source);
            }
        }

        debug!("No resolver accepted '{}'", query);
        Resolution::unresolved(name_or_ticker)
    }
}
