//! Scripted market data provider shared by the unit tests of this crate.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use spotfix_market_data::errors::MarketDataError;
use spotfix_market_data::{AssetProfile, MarketDataProvider, ProviderCapabilities, Quote};

/// One recorded `get_daily_series` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesCall {
    pub symbol: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Default)]
pub struct StubProvider {
    bars: HashMap<String, Vec<Quote>>,
    names: HashMap<String, String>,
    unknown: HashSet<String>,
    transient_failures: Mutex<HashMap<String, u32>>,
    delays: HashMap<String, Duration>,
    series_calls: Mutex<Vec<SeriesCall>>,
    profile_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Daily bar stamped at UTC midnight of `day`.
    pub fn with_bar(mut self, symbol: &str, day: NaiveDate, close: Decimal) -> Self {
        let ts = day.and_time(NaiveTime::MIN).and_utc();
        self.bars
            .entry(symbol.to_string())
            .or_default()
            .push(Quote::new(ts, close, "STUB"));
        self
    }

    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.bars.entry(symbol.to_string()).or_default().push(quote);
        self
    }

    /// Profile lookups for `symbol` return `name`.
    pub fn with_profile(mut self, symbol: &str, name: &str) -> Self {
        self.names.insert(symbol.to_string(), name.to_string());
        self
    }

    /// Every series request for `symbol` fails with `SymbolNotFound`.
    pub fn with_unknown(mut self, symbol: &str) -> Self {
        self.unknown.insert(symbol.to_string());
        self
    }

    /// The first `count` series requests for `symbol` time out.
    pub fn with_transient_failures(self, symbol: &str, count: u32) -> Self {
        self.transient_failures
            .lock()
            .unwrap()
            .insert(symbol.to_string(), count);
        self
    }

    /// Series requests for `symbol` complete after `delay`.
    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    pub fn series_calls(&self) -> Vec<SeriesCall> {
        self.series_calls.lock().unwrap().clone()
    }

    pub fn series_call_count(&self) -> usize {
        self.series_calls.lock().unwrap().len()
    }

    pub fn profile_call_count(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::default()
    }

    async fn get_daily_series(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        self.series_calls.lock().unwrap().push(SeriesCall {
            symbol: symbol.to_string(),
            start,
            end,
        });

        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }

        {
            let mut failures = self.transient_failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(symbol) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(MarketDataError::Timeout {
                        provider: "STUB".to_string(),
                    });
                }
            }
        }

        if self.unknown.contains(symbol) {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let quotes: Vec<Quote> = self
            .bars
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|q| q.timestamp >= start && q.timestamp < end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(quotes)
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.names
            .get(symbol)
            .map(|name| AssetProfile::with_name(name.clone()))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
