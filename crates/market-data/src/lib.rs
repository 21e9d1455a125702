//! Spotfix Market Data Crate
//!
//! This crate provides provider-agnostic historical price fetching and
//! symbol resolution for the spotfix fixing engine.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Daily historical series and descriptive profiles behind a single
//!   [`MarketDataProvider`] trait
//! - A Yahoo Finance provider
//! - Name-or-ticker resolution through an ordered chain of strategies
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Raw input      | --> |  ResolverChain   |  (alias table, probe, search)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   Resolution     |  (symbol + source)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Yahoo, test stubs)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     Quote        |  (daily bar)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Daily bar with close price and exchange UTC offset
//! - [`AssetProfile`] - Descriptive metadata used by the validation probe
//! - [`Resolution`] - Outcome of resolving a name or ticker
//! - [`AliasTable`] - Loadable name → symbol data asset

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

// Re-export all public types from models
pub use models::{AssetProfile, Currency, ProviderId, ProviderSymbol, Quote, SearchResult};

// Re-export resolver types
pub use resolver::{
    is_probe_candidate, normalize_query, AliasEntry, AliasResolver, AliasTable, AliasTableError,
    ProbeResolver, ProviderValidator, Resolution, ResolutionSource, ResolvedSymbol, Resolver,
    ResolverChain, SearchResolver, SymbolResolver, SymbolValidator,
};

// Re-export provider types
pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, ProviderCapabilities};
