//! Core error types for the spot fixing engine.
//!
//! Provider failures never surface here during a calculation: they degrade to
//! absent fixings or rejected probes. What remains are input validation
//! failures and configuration problems.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use spotfix_market_data::errors::MarketDataError;
use spotfix_market_data::AliasTableError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the spot fixing engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),

    #[error("Too many instruments: {count} given, at most {max} allowed")]
    TooManyInstruments { count: usize, max: usize },

    #[error("Invalid weight {weight} for '{input}': weights must be between 0 and {max}")]
    InvalidWeight { input: String, weight: f64, max: u32 },

    #[error("No instrument has both a name and at least one fixing date")]
    NoInstruments,
}

impl From<AliasTableError> for Error {
    fn from(err: AliasTableError) -> Self {
        Error::ConfigIO(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err: Error = ValidationError::TooManyInstruments { count: 11, max: 10 }.into();
        assert_eq!(
            err.to_string(),
            "Input validation failed: Too many instruments: 11 given, at most 10 allowed"
        );

        let err = ValidationError::InvalidWeight {
            input: "Apple".to_string(),
            weight: -1.0,
            max: 10,
        };
        assert!(err.to_string().contains("'Apple'"));
    }

    #[test]
    fn test_alias_table_error_is_config_error() {
        let err: Error = spotfix_market_data::AliasTable::from_json("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::ConfigIO(_)));
    }
}
