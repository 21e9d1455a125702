//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote, SearchResult};

use super::capabilities::ProviderCapabilities;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source, or to
/// stub the provider in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use spotfix_market_data::provider::{MarketDataProvider, ProviderCapabilities};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities::default()
///     }
///
///     // ... implement get_daily_series
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// to tag the `source` of returned quotes.
    fn id(&self) -> &'static str;

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch daily bars for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider symbol (e.g., "AAPL", "BNP.PA")
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range
    ///
    /// # Returns
    ///
    /// Daily bars ordered by timestamp ascending, or a `MarketDataError`.
    /// An empty range should be reported as `NoDataForRange`.
    async fn get_daily_series(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch descriptive metadata for a symbol.
    ///
    /// Default implementation returns `NotSupported`.
    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Search for symbols matching a free-text query.
    ///
    /// Default implementation returns `NotSupported`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }
}
