//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to fetch:
//! - Daily historical bars for equities, ETFs and indices (e.g., AAPL, BNP.PA)
//! - Descriptive profiles through the quoteSummary endpoint
//! - Free-text symbol search

mod models;

use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote, SearchResult};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

fn read_crumb() -> RwLockReadGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.read().unwrap_or_else(|poisoned| {
        warn!("Yahoo crumb lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

fn write_crumb() -> RwLockWriteGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.write().unwrap_or_else(|poisoned| {
        warn!("Yahoo crumb lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Exact decimal of the shortest representation of `value`, so a close of
/// `172.62` stays `172.62`. `None` for NaN and infinities.
fn price_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

fn provider_error(message: impl Into<String>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub async fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| provider_error(format!("Failed to initialize Yahoo connector: {}", e)))?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let cached = read_crumb().clone();
        if let Some(crumb) = cached {
            return Ok(crumb);
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        *write_crumb() = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        *write_crumb() = None;
    }

    // ========================================================================
    // Series Fetching
    // ========================================================================

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Classify connector failures so transient ones can be retried.
    fn map_connector_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        match e {
            yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                MarketDataError::SymbolNotFound(symbol.to_string())
            }
            yahoo::YahooError::TooManyRequests(_) => MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            },
            yahoo::YahooError::ConnectionFailed(ref err) if err.is_timeout() => {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            }
            yahoo::YahooError::ConnectionFailed(ref err) if err.is_connect() => {
                MarketDataError::Unreachable {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
            other => provider_error(other.to_string()),
        }
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(
        yahoo_quote: yahoo::Quote,
        utc_offset_secs: Option<i32>,
    ) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        // Yahoo pads missing sessions with NaN closes; those are not prices.
        let close = price_to_decimal(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote {
            timestamp,
            utc_offset_secs,
            open: price_to_decimal(yahoo_quote.open),
            high: price_to_decimal(yahoo_quote.high),
            low: price_to_decimal(yahoo_quote.low),
            close,
            volume: Decimal::from_u64(yahoo_quote.volume as u64),
            currency: None,
            source: PROVIDER_ID.to_string(),
        })
    }

    // ========================================================================
    // Profile Fetching
    // ========================================================================

    /// Fetch profile using quoteSummary API (richest data source).
    async fn fetch_quote_summary_profile(
        &self,
        symbol: &str,
    ) -> Result<AssetProfile, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Profile request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb();
                return Err(provider_error("Yahoo authentication expired"));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse profile response: {}", e)))?;

        let result = data
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_quote_summary_to_profile(&result))
    }

    /// Fetch profile using search (last resort, minimal data).
    async fn fetch_search_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let result = self
            .connector
            .search_ticker(&encode(symbol))
            .await
            .map_err(|e| provider_error(e.to_string()))?;

        let item = result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(AssetProfile {
            source: Some(PROVIDER_ID.to_string()),
            name: clean_name(Some(&item.long_name)),
            quote_type: Some(item.quote_type.to_uppercase()),
            exchange: Some(item.exchange.clone()),
            ..Default::default()
        })
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supports_historical: true,
            supports_search: true,
            supports_profile: true,
        }
    }

    async fn get_daily_series(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!(
            "Fetching daily series for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::chrono_to_offset_datetime(start),
                Self::chrono_to_offset_datetime(end),
            )
            .await
            .map_err(|e| Self::map_connector_error(symbol, e))?;

        // Exchange metadata carries the offset needed to put each bar back on
        // its local trading day.
        let utc_offset_secs = match response.metadata() {
            Ok(meta) => Some(meta.gmtoffset as i32),
            Err(e) => {
                debug!("No chart metadata for {}: {}", symbol, e);
                None
            }
        };

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let quotes: Vec<Quote> = yahoo_quotes
                    .into_iter()
                    .filter_map(|q| {
                        match Self::yahoo_quote_to_quote(q, utc_offset_secs) {
                            Ok(quote) => Some(quote),
                            Err(e) => {
                                warn!("Skipping bar due to conversion error: {:?}", e);
                                None
                            }
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No daily bars returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(Self::map_connector_error(symbol, e)),
        }
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        debug!("Fetching profile for {} from Yahoo", symbol);

        match self.fetch_quote_summary_profile(symbol).await {
            Ok(profile) => return Ok(profile),
            Err(e) => {
                debug!(
                    "quoteSummary failed for {}: {}, trying search fallback",
                    symbol, e
                );
            }
        }

        self.fetch_search_profile(symbol).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        debug!("Searching Yahoo for '{}'", query);

        let result = self
            .connector
            .search_ticker(&encode(query))
            .await
            .map_err(|e| provider_error(e.to_string()))?;

        Ok(result
            .quotes
            .iter()
            .map(|item| {
                SearchResult::new(
                    &item.symbol,
                    &item.long_name,
                    &item.exchange,
                    &item.quote_type,
                )
                .with_score(item.score)
            })
            .collect())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map quoteSummary result to AssetProfile.
fn map_quote_summary_to_profile(result: &YahooQuoteSummaryResult) -> AssetProfile {
    let price = result.price.as_ref();

    AssetProfile {
        source: Some(PROVIDER_ID.to_string()),
        name: clean_name(price.and_then(|p| p.long_name.as_deref())),
        quote_type: price
            .and_then(|p| p.quote_type.clone())
            .map(|t| t.to_uppercase()),
        currency: price.and_then(|p| p.currency.clone()),
        exchange: price.and_then(|p| p.exchange_name.clone()),
    }
}

/// Decode HTML entities Yahoo leaves in long names. Blank names are absent.
fn clean_name(long_name: Option<&str>) -> Option<String> {
    let name = long_name?.replace("&amp;", "&").trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetryClass;
    use models::YahooPriceData;

    #[test]
    fn test_clean_name() {
        assert_eq!(
            clean_name(Some("Johnson &amp; Johnson")),
            Some("Johnson & Johnson".to_string())
        );
        assert_eq!(clean_name(Some("   ")), None);
        assert_eq!(clean_name(None), None);
    }

    #[test]
    fn test_map_quote_summary_to_profile() {
        let result = YahooQuoteSummaryResult {
            price: Some(YahooPriceData {
                currency: Some("EUR".to_string()),
                long_name: Some("BNP Paribas SA".to_string()),
                quote_type: Some("equity".to_string()),
                exchange_name: Some("Paris".to_string()),
            }),
        };

        let profile = map_quote_summary_to_profile(&result);
        assert_eq!(profile.name.as_deref(), Some("BNP Paribas SA"));
        assert_eq!(profile.quote_type.as_deref(), Some("EQUITY"));
        assert_eq!(profile.currency.as_deref(), Some("EUR"));
        assert!(profile.has_display_name());
    }

    #[test]
    fn test_profile_without_long_name_has_no_display_name() {
        let result = YahooQuoteSummaryResult {
            price: Some(YahooPriceData {
                currency: None,
                long_name: None,
                quote_type: None,
                exchange_name: None,
            }),
        };

        let profile = map_quote_summary_to_profile(&result);
        assert!(!profile.has_display_name());
    }

    #[test]
    fn test_chrono_to_offset_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let converted = YahooProvider::chrono_to_offset_datetime(dt);
        assert_eq!(converted.unix_timestamp(), dt.timestamp());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let error = YahooProvider::map_connector_error(
            "AAPL",
            yahoo::YahooError::TooManyRequests("request url: chart".to_string()),
        );
        assert!(matches!(error, MarketDataError::RateLimited { .. }));
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_empty_result_is_symbol_not_found() {
        let error = YahooProvider::map_connector_error("NOPE", yahoo::YahooError::NoQuotes);
        assert!(matches!(error, MarketDataError::SymbolNotFound(ref s) if s == "NOPE"));
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_http_failure_is_terminal() {
        let error = YahooProvider::map_connector_error(
            "AAPL",
            yahoo::YahooError::FetchFailed("HTTP error: 404 Not Found".to_string()),
        );
        assert!(matches!(error, MarketDataError::ProviderError { .. }));
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    fn bar(close: f64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp: 1_710_489_600,
            open: 171.5,
            high: 173.1,
            low: 170.9,
            volume: 1_000,
            close,
            adjclose: close,
        }
    }

    #[test]
    fn test_close_keeps_shortest_decimal() {
        let quote = YahooProvider::yahoo_quote_to_quote(bar(172.62), Some(-14_400)).unwrap();
        assert_eq!(quote.close.to_string(), "172.62");
        assert_eq!(quote.high.map(|h| h.to_string()).as_deref(), Some("173.1"));
        assert_eq!(quote.utc_offset_secs, Some(-14_400));
    }

    #[test]
    fn test_price_to_decimal() {
        assert_eq!(price_to_decimal(0.1).unwrap().to_string(), "0.1");
        assert_eq!(price_to_decimal(4512.3).unwrap().to_string(), "4512.3");
        assert!(price_to_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_nan_close_is_rejected() {
        assert!(YahooProvider::yahoo_quote_to_quote(bar(f64::NAN), None).is_err());
    }
}
