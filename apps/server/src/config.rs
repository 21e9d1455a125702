use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use spotfix_core::{FetchMode, RetrySettings, SpotPolicy, SpotSettings};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("Unknown log format '{}'", other)),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
    pub spot: SpotSettings,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("SPOTFIX_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SPOTFIX_LISTEN_ADDR")?;
        let cors_allow = env_or("SPOTFIX_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("SPOTFIX_REQUEST_TIMEOUT_MS")?.unwrap_or(30000);
        let log_format = parse_env("SPOTFIX_LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
            spot: spot_settings_from_env()?,
        })
    }
}

fn spot_settings_from_env() -> anyhow::Result<SpotSettings> {
    let defaults = SpotSettings::default();
    let retry = RetrySettings {
        max_attempts: parse_env("SPOTFIX_RETRY_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts),
        base_delay_ms: parse_env("SPOTFIX_RETRY_BASE_DELAY_MS")?
            .unwrap_or(defaults.retry.base_delay_ms),
    };
    let default_policy = std::env::var("SPOTFIX_DEFAULT_POLICY")
        .ok()
        .map(|p| SpotPolicy::parse_lenient(&p))
        .unwrap_or(defaults.default_policy);
    let alias_table_path = std::env::var("SPOTFIX_ALIAS_TABLE")
        .ok()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let settings = SpotSettings {
        window_days: parse_env("SPOTFIX_WINDOW_DAYS")?.unwrap_or(defaults.window_days),
        fetch_mode: parse_env::<FetchMode>("SPOTFIX_FETCH_MODE")?.unwrap_or(defaults.fetch_mode),
        max_concurrency: parse_env("SPOTFIX_MAX_CONCURRENCY")?
            .unwrap_or(defaults.max_concurrency),
        retry,
        cache_enabled: parse_env("SPOTFIX_CACHE_ENABLED")?.unwrap_or(defaults.cache_enabled),
        cache_capacity: parse_env("SPOTFIX_CACHE_CAPACITY")?.unwrap_or(defaults.cache_capacity),
        search_fallback: parse_env("SPOTFIX_SEARCH_FALLBACK")?
            .unwrap_or(defaults.search_fallback),
        alias_table_path,
        default_policy,
    };
    settings.validate()?;
    Ok(settings)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `Ok(None)` when the variable is unset or blank.
fn parse_env<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("Invalid {}: {}", key, e)),
        _ => Ok(None),
    }
}
