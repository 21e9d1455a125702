use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily market data bar
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the bar (UTC instant)
    pub timestamp: DateTime<Utc>,

    /// Offset of the exchange's local time from UTC, in seconds.
    ///
    /// `None` when the provider reports timezone-naive timestamps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_secs: Option<i32>,

    /// Opening price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    /// High price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    /// Low price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    /// Closing price (required)
    pub close: Decimal,

    /// Trading volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Quote currency, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Source of the quote (YAHOO, STUB, etc.)
    pub source: String,
}

impl Quote {
    /// Create a new quote with minimal required fields
    pub fn new(timestamp: DateTime<Utc>, close: Decimal, source: impl Into<String>) -> Self {
        Self {
            timestamp,
            utc_offset_secs: None,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
            currency: None,
            source: source.into(),
        }
    }

    /// Set the quote currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Attach the exchange UTC offset reported by the provider.
    pub fn with_utc_offset(mut self, offset_secs: i32) -> Self {
        self.utc_offset_secs = Some(offset_secs);
        self
    }

    /// Timezone-naive wall-clock time of the bar.
    ///
    /// When the provider reported an exchange offset the instant is shifted to
    /// exchange-local time before the zone is dropped, so a Tokyo bar stamped
    /// 00:00 JST stays on its trading day instead of falling back to the
    /// previous UTC date.
    pub fn local_datetime(&self) -> NaiveDateTime {
        match self.utc_offset_secs.and_then(FixedOffset::east_opt) {
            Some(offset) => self.timestamp.with_timezone(&offset).naive_local(),
            None => self.timestamp.naive_utc(),
        }
    }
}
