//! Report domain models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spotfix_market_data::ResolutionSource;

use crate::constants::MISSING_VALUE;
use crate::fixings::{split_date_lines, PriceFixing};
use crate::spot::{round_for_display, SpotPolicy};

/// One underlying as submitted by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRequest {
    /// Company name or ticker as entered.
    pub name: String,
    /// Fixing dates (`DD/MM/YYYY`), in input order.
    #[serde(default)]
    pub dates: Vec<String>,
    /// `0` means equal weight.
    #[serde(default)]
    pub weight: f64,
    /// Pre-resolved symbol; skips resolution when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl InstrumentRequest {
    pub fn new<S: Into<String>>(name: impl Into<String>, dates: Vec<S>, weight: f64) -> Self {
        Self {
            name: name.into(),
            dates: dates.into_iter().map(Into::into).collect(),
            weight,
            symbol: None,
        }
    }

    /// Build from a newline-separated block of dates.
    pub fn from_dates_text(name: impl Into<String>, dates_text: &str, weight: f64) -> Self {
        Self {
            name: name.into(),
            dates: split_date_lines(dates_text),
            weight,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// An underlying admitted to the working set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentReference {
    pub input_name: String,
    pub resolved_symbol: String,
    pub was_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_source: Option<ResolutionSource>,
    pub fixing_dates: Vec<String>,
    pub weight: Decimal,
}

/// Fixings of one instrument and the spot derived from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotResult {
    pub fixings: Vec<PriceFixing>,
    pub spot: Option<Decimal>,
}

/// One line of the result table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub input_name: String,
    pub symbol: String,
    pub was_resolved: bool,
    pub dates: Vec<String>,
    /// One entry per date, `N/A` for absent fixings.
    pub raw_values: Vec<String>,
    /// Unrounded spot.
    pub spot: Option<Decimal>,
    /// Effective weight (zero already replaced by one).
    pub weight: Decimal,
    pub dates_display: String,
    pub values_display: String,
    pub spot_display: String,
}

impl ReportRow {
    pub fn new(instrument: &InstrumentReference, result: &SpotResult, weight: Decimal) -> Self {
        let raw_values: Vec<String> = result
            .fixings
            .iter()
            .map(PriceFixing::display_value)
            .collect();
        Self {
            input_name: instrument.input_name.clone(),
            symbol: instrument.resolved_symbol.clone(),
            was_resolved: instrument.was_resolved,
            dates: instrument.fixing_dates.clone(),
            dates_display: instrument.fixing_dates.join(", "),
            values_display: raw_values.join(", "),
            raw_values,
            spot: result.spot,
            weight,
            spot_display: display_spot(result.spot),
        }
    }
}

/// Non-fatal conditions surfaced alongside the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportWarning {
    /// No strategy resolved the input; the fallback symbol was used.
    #[serde(rename_all = "camelCase")]
    UnresolvedSymbol { input: String, fallback: String },
    /// A resolved input came without dates and was left out.
    #[serde(rename_all = "camelCase")]
    MissingDates { input: String, symbol: String },
    /// Every fixing of the instrument is absent.
    #[serde(rename_all = "camelCase")]
    MissingSpot { symbol: String },
    /// No instrument produced a spot.
    GlobalSpotUndefined,
    /// The weighted sum does not fit in a decimal.
    GlobalSpotOverflow,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::UnresolvedSymbol { input, fallback } => write!(
                f,
                "No ticker found for '{}'; using raw input {} (price retrieval may fail)",
                input, fallback
            ),
            ReportWarning::MissingDates { symbol, .. } => write!(
                f,
                "Fixing dates for {} are missing; it is left out of the calculation",
                symbol
            ),
            ReportWarning::MissingSpot { symbol } => {
                write!(f, "No spot could be computed for {}", symbol)
            }
            ReportWarning::GlobalSpotUndefined => write!(
                f,
                "Global spot is undefined: no instrument has a valid price"
            ),
            ReportWarning::GlobalSpotOverflow => write!(
                f,
                "Global spot is undefined: the weighted prices are too large to combine"
            ),
        }
    }
}

/// Complete result of a calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotReport {
    pub rows: Vec<ReportRow>,
    /// Unrounded weighted global spot.
    pub global_spot: Option<Decimal>,
    pub global_spot_display: String,
    pub policy: SpotPolicy,
    pub policy_label: String,
    pub warnings: Vec<ReportWarning>,
    pub missing_spot_count: usize,
}

/// Spot rounded for display, or `N/A`.
pub fn display_spot(spot: Option<Decimal>) -> String {
    match spot {
        Some(spot) => format!("{:.6}", round_for_display(spot)),
        None => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_spot() {
        assert_eq!(display_spot(Some(dec!(500) / dec!(3))), "166.666667");
        assert_eq!(display_spot(Some(dec!(200))), "200.000000");
        assert_eq!(display_spot(None), "N/A");
    }

    #[test]
    fn test_request_from_dates_text() {
        let request = InstrumentRequest::from_dates_text("Apple", "15/03/2024\n\n 18/03/2024 ", 0.0);
        assert_eq!(request.dates, vec!["15/03/2024", "18/03/2024"]);
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: InstrumentRequest = serde_json::from_str(r#"{"name": "Apple"}"#).unwrap();
        assert!(request.dates.is_empty());
        assert_eq!(request.weight, 0.0);
        assert!(request.symbol.is_none());
    }

    #[test]
    fn test_row_display_columns() {
        let instrument = InstrumentReference {
            input_name: "Apple".to_string(),
            resolved_symbol: "AAPL".to_string(),
            was_resolved: true,
            resolution_source: Some(ResolutionSource::Alias),
            fixing_dates: vec!["15/03/2024".to_string(), "bad".to_string()],
            weight: dec!(0),
        };
        let result = SpotResult {
            fixings: vec![
                PriceFixing::observed("15/03/2024", dec!(172.62)),
                PriceFixing::absent("bad"),
            ],
            spot: Some(dec!(172.62)),
        };

        let row = ReportRow::new(&instrument, &result, dec!(1));
        assert_eq!(row.raw_values, vec!["172.62", "N/A"]);
        assert_eq!(row.dates_display, "15/03/2024, bad");
        assert_eq!(row.values_display, "172.62, N/A");
        assert_eq!(row.spot_display, "172.620000");
        assert_eq!(row.weight, dec!(1));
    }

    #[test]
    fn test_warning_serialization() {
        let warning = ReportWarning::UnresolvedSymbol {
            input: "Acme".to_string(),
            fallback: "ACME".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "unresolvedSymbol");
        assert_eq!(json["fallback"], "ACME");

        let json = serde_json::to_value(ReportWarning::GlobalSpotUndefined).unwrap();
        assert_eq!(json["kind"], "globalSpotUndefined");
    }
}
