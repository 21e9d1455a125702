//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency, ProviderSymbol)
//! - `quote` - Daily bar data (Quote)
//! - `profile` - Descriptive asset metadata (AssetProfile)
//! - `search` - Search result data (SearchResult)

mod profile;
mod quote;
mod search;
mod types;

pub use profile::AssetProfile;
pub use quote::Quote;
pub use search::SearchResult;
pub use types::{Currency, ProviderId, ProviderSymbol};
