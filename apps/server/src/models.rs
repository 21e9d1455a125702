use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spotfix_core as spot_core;
use spotfix_core::SpotPolicy;
use spotfix_market_data as market_data;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    /// Company name or ticker.
    pub query: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub input: String,
    pub symbol: String,
    pub was_resolved: bool,
    /// `alias`, `probe` or `search`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<market_data::Resolution> for Resolution {
    fn from(r: market_data::Resolution) -> Self {
        Self {
            input: r.input,
            symbol: r.symbol.to_string(),
            was_resolved: r.was_resolved,
            source: r.source.map(source_id),
        }
    }
}

fn source_id(source: market_data::ResolutionSource) -> String {
    match source {
        market_data::ResolutionSource::Alias => "alias",
        market_data::ResolutionSource::Probe => "probe",
        market_data::ResolutionSource::Search => "search",
    }
    .to_string()
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInput {
    pub name: String,
    /// Fixing dates as `DD/MM/YYYY`.
    #[serde(default)]
    pub dates: Vec<String>,
    /// Newline-separated dates, appended after `dates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates_text: Option<String>,
    /// `0` means equal weight.
    #[serde(default)]
    pub weight: f64,
    /// Skip resolution and use this symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl From<InstrumentInput> for spot_core::InstrumentRequest {
    fn from(i: InstrumentInput) -> Self {
        let mut request = match i.dates_text.as_deref() {
            Some(text) => {
                let mut request =
                    spot_core::InstrumentRequest::from_dates_text(i.name, text, i.weight);
                let mut dates = i.dates;
                dates.append(&mut request.dates);
                request.dates = dates;
                request
            }
            None => spot_core::InstrumentRequest::new(i.name, i.dates, i.weight),
        };
        request.symbol = i.symbol;
        request
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub instruments: Vec<InstrumentInput>,
    /// Policy id or label; the server default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

impl ReportRequest {
    pub fn policy_or(&self, default: SpotPolicy) -> SpotPolicy {
        self.policy
            .as_deref()
            .map(SpotPolicy::parse_lenient)
            .unwrap_or(default)
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub input_name: String,
    pub symbol: String,
    pub was_resolved: bool,
    pub dates: Vec<String>,
    pub raw_values: Vec<String>,
    pub spot: Option<Decimal>,
    pub weight: Decimal,
    pub dates_display: String,
    pub values_display: String,
    pub spot_display: String,
}

impl From<spot_core::ReportRow> for ReportRow {
    fn from(r: spot_core::ReportRow) -> Self {
        Self {
            input_name: r.input_name,
            symbol: r.symbol,
            was_resolved: r.was_resolved,
            dates: r.dates,
            raw_values: r.raw_values,
            spot: r.spot,
            weight: r.weight,
            dates_display: r.dates_display,
            values_display: r.values_display,
            spot_display: r.spot_display,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportWarning {
    /// Serialized kind, e.g. `unresolvedSymbol`.
    pub kind: String,
    pub message: String,
}

impl From<spot_core::ReportWarning> for ReportWarning {
    fn from(w: spot_core::ReportWarning) -> Self {
        let kind = match &w {
            spot_core::ReportWarning::UnresolvedSymbol { .. } => "unresolvedSymbol",
            spot_core::ReportWarning::MissingDates { .. } => "missingDates",
            spot_core::ReportWarning::MissingSpot { .. } => "missingSpot",
            spot_core::ReportWarning::GlobalSpotUndefined => "globalSpotUndefined",
            spot_core::ReportWarning::GlobalSpotOverflow => "globalSpotOverflow",
        };
        Self {
            kind: kind.to_string(),
            message: w.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpotReport {
    pub rows: Vec<ReportRow>,
    pub global_spot: Option<Decimal>,
    pub global_spot_display: String,
    pub policy: String,
    pub policy_label: String,
    pub warnings: Vec<ReportWarning>,
    pub missing_spot_count: usize,
}

impl From<spot_core::SpotReport> for SpotReport {
    fn from(r: spot_core::SpotReport) -> Self {
        Self {
            rows: r.rows.into_iter().map(ReportRow::from).collect(),
            global_spot: r.global_spot,
            global_spot_display: r.global_spot_display,
            policy: r.policy.id().to_string(),
            policy_label: r.policy_label,
            warnings: r.warnings.into_iter().map(ReportWarning::from).collect(),
            missing_spot_count: r.missing_spot_count,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInfo {
    pub id: String,
    pub label: String,
    pub is_default: bool,
}

impl PolicyInfo {
    pub fn list(default: SpotPolicy) -> Vec<Self> {
        SpotPolicy::ALL
            .iter()
            .map(|p| Self {
                id: p.id().to_string(),
                label: p.label().to_string(),
                is_default: *p == default,
            })
            .collect()
    }
}
