//! Resolution traits for the market data crate.
//!
//! Defines the core abstractions for turning user input into provider
//! symbols.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::ProviderSymbol;

use super::chain::Resolution;

/// Resolution result from a single strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// The provider symbol.
    pub symbol: ProviderSymbol,
    /// Which strategy produced it.
    pub source: ResolutionSource,
}

/// Indicates how a symbol was resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Exact hit in the alias table.
    Alias,
    /// Short ticker accepted by the validation probe.
    Probe,
    /// First usable hit from a free-text provider search.
    Search,
}

/// Individual strategy in the resolution chain.
///
/// Strategies are tried in order until one returns a result. Returning `None`
/// means this strategy cannot resolve the input and the next one is tried.
/// Strategies must absorb their own failures: a provider error is a miss.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// The source tag attached to symbols this strategy produces.
    fn source(&self) -> ResolutionSource;

    /// Attempt to resolve an already normalised query (trimmed, uppercased).
    async fn try_resolve(&self, query: &str) -> Option<ResolvedSymbol>;
}

/// Main symbol resolver interface.
///
/// Unlike `Resolver::try_resolve`, this always returns a [`Resolution`]:
/// failures fall back to the normalised input with `was_resolved == false`.
#[async_trait]
pub trait SymbolResolver: Send + Sync {
    /// Resolve a raw name-or-ticker string as entered by the user.
    async fn resolve(&self, name_or_ticker: &str) -> Resolution;
}

/// Normalise user input for lookup: trim surrounding whitespace, uppercase.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_uppercase()
}
