use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_CONCURRENCY, DEFAULT_RETRY_BASE_DELAY_MS,
    DEFAULT_WINDOW_DAYS,
};
use crate::errors::{Error, Result};
use crate::spot::SpotPolicy;

/// How fixings are scheduled against the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One provider round trip at a time.
    #[default]
    Sequential,
    /// Overlap (symbol, date) fetches up to `max_concurrency`.
    Concurrent,
}

impl FromStr for FetchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(FetchMode::Sequential),
            "concurrent" => Ok(FetchMode::Concurrent),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown fetch mode '{}' (expected sequential or concurrent)",
                other
            ))),
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Sequential => write!(f, "sequential"),
            FetchMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// Bounded retry for transient provider errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrySettings {
    /// Total attempts per series request, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on each further attempt.
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl RetrySettings {
    /// Backoff before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u64.saturating_pow(retry.saturating_sub(1));
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }
}

/// Engine settings for resolution and fixing retrieval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotSettings {
    pub window_days: u32,
    pub fetch_mode: FetchMode,
    pub max_concurrency: usize,
    pub retry: RetrySettings,
    pub cache_enabled: bool,
    /// Cached fixings kept before the cache is flushed.
    pub cache_capacity: usize,
    pub search_fallback: bool,
    /// Replacement alias table (JSON). The bundled table is used when unset.
    pub alias_table_path: Option<String>,
    pub default_policy: SpotPolicy,
}

impl Default for SpotSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            fetch_mode: FetchMode::Sequential,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            retry: RetrySettings::default(),
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            search_fallback: false,
            alias_table_path: None,
            default_policy: SpotPolicy::Mean,
        }
    }
}

impl SpotSettings {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(Error::InvalidConfigValue(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(Error::InvalidConfigValue(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::InvalidConfigValue(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SpotSettings::default();
        assert_eq!(settings.window_days, 4);
        assert_eq!(settings.fetch_mode, FetchMode::Sequential);
        assert_eq!(settings.retry.max_attempts, 1);
        assert!(settings.cache_enabled);
        assert_eq!(settings.cache_capacity, 10_000);
        assert!(!settings.search_fallback);
        assert_eq!(settings.default_policy, SpotPolicy::Mean);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: SpotSettings =
            serde_json::from_str(r#"{"fetchMode": "concurrent", "retry": {"maxAttempts": 3}}"#)
                .unwrap();
        assert_eq!(settings.fetch_mode, FetchMode::Concurrent);
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.base_delay_ms, 250);
        assert_eq!(settings.window_days, 4);
    }

    #[test]
    fn test_fetch_mode_from_str() {
        assert_eq!(
            "Concurrent".parse::<FetchMode>().unwrap(),
            FetchMode::Concurrent
        );
        assert_eq!(
            " sequential ".parse::<FetchMode>().unwrap(),
            FetchMode::Sequential
        );
        assert!("parallel".parse::<FetchMode>().is_err());
    }

    #[test]
    fn test_backoff_doubles() {
        let retry = RetrySettings {
            max_attempts: 4,
            base_delay_ms: 100,
        };
        assert_eq!(retry.delay_for(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let settings = SpotSettings {
            max_concurrency: 0,
            ..SpotSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidConfigValue(_))
        ));

        let settings = SpotSettings {
            retry: RetrySettings {
                max_attempts: 0,
                base_delay_ms: 10,
            },
            ..SpotSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = SpotSettings {
            cache_capacity: 0,
            ..SpotSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
