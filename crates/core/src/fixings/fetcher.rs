//! Price fixing fetcher.
//!
//! Turns a (symbol, date string) pair into a [`PriceFixing`]: parse the date,
//! request a window of daily bars around it, keep the close of the bar
//! nearest to the target. Every failure along the way yields an absent
//! fixing; nothing here returns an error.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use rust_decimal::Decimal;

use spotfix_market_data::errors::{MarketDataError, RetryClass};
use spotfix_market_data::{MarketDataProvider, Quote};

use super::cache::FixingCache;
use super::date::parse_fixing_date;
use super::model::PriceFixing;
use super::nearest::select_nearest_close;
use crate::settings::{FetchMode, RetrySettings, SpotSettings};

/// One fixing to retrieve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixingRequest {
    pub symbol: String,
    pub date: String,
}

impl FixingRequest {
    pub fn new(symbol: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            date: date.into(),
        }
    }
}

pub struct FixingFetcher {
    provider: Arc<dyn MarketDataProvider>,
    window_days: u32,
    fetch_mode: FetchMode,
    max_concurrency: usize,
    retry: RetrySettings,
    cache: Option<Arc<FixingCache>>,
}

impl FixingFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: &SpotSettings) -> Self {
        let cache = settings
            .cache_enabled
            .then(|| Arc::new(FixingCache::with_capacity(settings.cache_capacity)));
        Self {
            provider,
            window_days: settings.window_days,
            fetch_mode: settings.fetch_mode,
            max_concurrency: settings.max_concurrency.max(1),
            retry: settings.retry.clone(),
            cache,
        }
    }

    /// Share an existing cache instead of the one created from settings.
    pub fn with_cache(mut self, cache: Arc<FixingCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&Arc<FixingCache>> {
        self.cache.as_ref()
    }

    /// Fetch one fixing.
    pub async fn fetch_fixing(&self, symbol: &str, date_str: &str) -> PriceFixing {
        let target = match parse_fixing_date(date_str) {
            Ok(date) => date,
            Err(e) => {
                warn!("Unparseable fixing date '{}' for {}: {}", date_str, symbol, e);
                return PriceFixing::absent(date_str);
            }
        };

        match self.fetch_price(symbol, target).await {
            Some(price) => PriceFixing::observed(date_str, price),
            None => PriceFixing::absent(date_str),
        }
    }

    /// Fetch a batch of fixings. Results are returned in request order
    /// whatever the fetch mode.
    pub async fn fetch_batch(&self, requests: &[FixingRequest]) -> Vec<PriceFixing> {
        match self.fetch_mode {
            FetchMode::Sequential => {
                let mut fixings = Vec::with_capacity(requests.len());
                for request in requests {
                    fixings.push(self.fetch_fixing(&request.symbol, &request.date).await);
                }
                fixings
            }
            FetchMode::Concurrent => {
                stream::iter(requests.iter().cloned())
                    .map(|request| async move {
                        self.fetch_fixing(&request.symbol, &request.date).await
                    })
                    .buffered(self.max_concurrency)
                    .collect::<Vec<_>>()
                    .await
            }
        }
    }

    /// Close nearest to `target`, read through the cache.
    pub async fn fetch_price(&self, symbol: &str, target: NaiveDate) -> Option<Decimal> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(symbol, target)) {
            debug!("Cache hit for {} on {}", symbol, target);
            return Some(cached);
        }

        let (start, end) = self.window(target)?;
        let quotes = match self.fetch_series(symbol, start, end).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!("No fixing for {} on {}: {}", symbol, target, e);
                return None;
            }
        };

        let price = select_nearest_close(&quotes, target);
        match price {
            Some(price) => {
                if let Some(cache) = &self.cache {
                    cache.insert(symbol, target, price);
                }
            }
            None => warn!("No trading activity for {} around {}", symbol, target),
        }
        price
    }

    /// `[target - window, target + window]` in whole days, as a half-open
    /// UTC range.
    fn window(&self, target: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let days = Days::new(u64::from(self.window_days));
        let first = target.checked_sub_days(days)?;
        let after_last = target.checked_add_days(days)?.succ_opt()?;
        Some((
            first.and_time(NaiveTime::MIN).and_utc(),
            after_last.and_time(NaiveTime::MIN).and_utc(),
        ))
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let mut attempt = 1;
        loop {
            debug!(
                "Requesting {} bars from {} ({} to {}, attempt {})",
                symbol,
                self.provider.id(),
                start,
                end,
                attempt
            );
            match self.provider.get_daily_series(symbol, start, end).await {
                Ok(quotes) => return Ok(quotes),
                Err(e)
                    if e.retry_class() == RetryClass::WithBackoff
                        && attempt < self.retry.max_attempts =>
                {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "Transient error for {}: {}. Retrying in {:?}",
                        symbol, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
