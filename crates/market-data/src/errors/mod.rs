//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Callers above the provider layer never propagate these: a failed series
/// fetch becomes an absent fixing and a failed profile fetch becomes a
/// rejected probe. The [`retry_class`](Self::retry_class) tells the fixing
/// fetcher whether a bounded retry is worth attempting first.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The symbol exists but has no bars in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The provider rate limited the request (HTTP 429).
    /// Should retry with exponential backoff.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    /// Should retry with exponential backoff.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider could not be reached (connection refused or reset).
    /// Should retry with exponential backoff.
    #[error("Provider unreachable: {provider} - {message}")]
    Unreachable {
        /// The provider that could not be reached
        provider: String,
        /// The underlying connection error
        message: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider does not implement the requested operation.
    #[error("{operation} not supported by {provider}")]
    NotSupported {
        /// Operation name (e.g., "search")
        operation: String,
        /// The provider lacking support
        provider: String,
    },

    /// Data validation failed.
    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: Don't retry, the error is terminal
    /// - [`RetryClass::WithBackoff`]: Retry with exponential backoff
    ///
    /// # Examples
    ///
    /// ```
    /// use spotfix_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "YAHOO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Transient errors - retry with backoff
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Unreachable { .. } => {
                RetryClass::WithBackoff
            }
            Self::Network(e) if e.is_timeout() || e.is_connect() => RetryClass::WithBackoff,

            Self::SymbolNotFound(_)
            | Self::NoDataForRange
            | Self::ProviderError { .. }
            | Self::NotSupported { .. }
            | Self::ValidationFailed { .. }
            | Self::Network(_) => RetryClass::Never,
        }
    }
}
