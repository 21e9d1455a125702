//! Symbol resolution for user-supplied names and tickers.
//!
//! This module turns a free-form input such as `"Apple"`, `" bnp paribas "`
//! or `"MC.PA"` into a tradable provider symbol.
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ResolverChain                           │
//! │                                                              │
//! │  normalize: trim + uppercase                                 │
//! │                           │                                  │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. Alias Resolver (static table)                        │ │
//! │  │    - Exact lookup of well-known company names           │ │
//! │  │    - Never fails, never touches the network             │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. Probe Resolver (heuristic ticker)                    │ │
//! │  │    - ≤ 10 chars, no whitespace                          │ │
//! │  │    - Accepted iff the provider describes the symbol     │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 3. Search Resolver (optional, best effort)              │ │
//! │  │    - Free-text provider search, first usable hit        │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution never errors. When every strategy misses, the returned
//! [`Resolution`] carries the normalised input as a best-effort symbol with
//! `was_resolved == false`, and the caller decides how loudly to warn.
//!
//! # Example
//!
//! ```ignore
//! use spotfix_market_data::resolver::{AliasTable, ResolverChain, SymbolResolver};
//!
//! let chain = ResolverChain::new(AliasTable::embedded(), validator);
//!
//! let resolution = chain.resolve("  Apple ").await;
//! // resolution.symbol = "AAPL", resolution.source = Some(ResolutionSource::Alias)
//! ```

mod alias_resolver;
mod alias_table;
mod chain;
mod probe_resolver;
mod search_resolver;
mod traits;

// Re-export main types
pub use alias_resolver::AliasResolver;
pub use alias_table::{AliasEntry, AliasTable, AliasTableError};
pub use chain::{Resolution, ResolverChain};
pub use probe_resolver::{is_probe_candidate, ProbeResolver, ProviderValidator, SymbolValidator};
pub use search_resolver::SearchResolver;
pub use traits::{normalize_query, ResolutionSource, ResolvedSymbol, Resolver, SymbolResolver};
