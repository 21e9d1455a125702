//! Spot report service.
//!
//! Orchestrates one calculation: resolve each input, fetch its fixings,
//! aggregate per instrument under the chosen policy, then combine into the
//! weighted global spot.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

use spotfix_market_data::{Resolution, SymbolResolver};

use super::model::{
    InstrumentReference, InstrumentRequest, ReportRow, ReportWarning, SpotReport, SpotResult,
};
use crate::constants::{MAX_INSTRUMENTS, MAX_WEIGHT};
use crate::errors::{Result, ValidationError};
use crate::fixings::{FixingFetcher, FixingRequest, PriceFixing};
use crate::report::model::display_spot;
use crate::spot::{compute_global_spot, compute_spot, effective_weight, SpotPolicy};

/// Entry points exposed to callers.
#[async_trait]
pub trait SpotServiceTrait: Send + Sync {
    /// Resolve a name or ticker. Never fails.
    async fn resolve(&self, name_or_ticker: &str) -> Resolution;

    /// Run a full calculation.
    ///
    /// Fails only on invalid input (too many instruments, bad weights) or
    /// when no instrument has both a name and a date.
    async fn compute_report(
        &self,
        instruments: Vec<InstrumentRequest>,
        policy: SpotPolicy,
    ) -> Result<SpotReport>;

    /// Policy used when the caller does not pick one.
    fn default_policy(&self) -> SpotPolicy;
}

pub struct SpotService {
    resolver: Arc<dyn SymbolResolver>,
    fetcher: Arc<FixingFetcher>,
    default_policy: SpotPolicy,
}

impl SpotService {
    pub fn new(
        resolver: Arc<dyn SymbolResolver>,
        fetcher: Arc<FixingFetcher>,
        default_policy: SpotPolicy,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            default_policy,
        }
    }

    /// Turn a request into a working-set entry, or `None` when it is left
    /// out (blank name, no dates).
    async fn admit(
        &self,
        request: &InstrumentRequest,
        warnings: &mut Vec<ReportWarning>,
    ) -> Result<Option<InstrumentReference>> {
        let input_name = request.name.trim();
        let weight = validate_weight(input_name, request.weight)?;
        if input_name.is_empty() {
            return Ok(None);
        }

        let override_symbol = request
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let (resolved_symbol, was_resolved, resolution_source) = match override_symbol {
            Some(symbol) => (symbol.to_uppercase(), true, None),
            None => {
                let resolution = self.resolver.resolve(input_name).await;
                (
                    resolution.symbol.to_string(),
                    resolution.was_resolved,
                    resolution.source,
                )
            }
        };

        if !was_resolved {
            warn!(
                "No ticker found for '{}', falling back to {}",
                input_name, resolved_symbol
            );
            warnings.push(ReportWarning::UnresolvedSymbol {
                input: input_name.to_string(),
                fallback: resolved_symbol.clone(),
            });
        }

        let fixing_dates: Vec<String> = request
            .dates
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();

        if fixing_dates.is_empty() {
            if was_resolved {
                warn!("No fixing dates for {}, leaving it out", resolved_symbol);
                warnings.push(ReportWarning::MissingDates {
                    input: input_name.to_string(),
                    symbol: resolved_symbol,
                });
            }
            return Ok(None);
        }

        Ok(Some(InstrumentReference {
            input_name: input_name.to_string(),
            resolved_symbol,
            was_resolved,
            resolution_source,
            fixing_dates,
            weight,
        }))
    }
}

#[async_trait]
impl SpotServiceTrait for SpotService {
    async fn resolve(&self, name_or_ticker: &str) -> Resolution {
        self.resolver.resolve(name_or_ticker).await
    }

    async fn compute_report(
        &self,
        instruments: Vec<InstrumentRequest>,
        policy: SpotPolicy,
    ) -> Result<SpotReport> {
        if instruments.len() > MAX_INSTRUMENTS {
            return Err(ValidationError::TooManyInstruments {
                count: instruments.len(),
                max: MAX_INSTRUMENTS,
            }
            .into());
        }

        let mut warnings = Vec::new();
        let mut working_set = Vec::with_capacity(instruments.len());
        for request in &instruments {
            if let Some(instrument) = self.admit(request, &mut warnings).await? {
                working_set.push(instrument);
            }
        }

        if working_set.is_empty() {
            return Err(ValidationError::NoInstruments.into());
        }

        let requests: Vec<FixingRequest> = working_set
            .iter()
            .flat_map(|instrument| {
                instrument
                    .fixing_dates
                    .iter()
                    .map(move |date| FixingRequest::new(instrument.resolved_symbol.clone(), date))
            })
            .collect();
        debug!(
            "Fetching {} fixings for {} instruments",
            requests.len(),
            working_set.len()
        );
        let mut fixings = self.fetcher.fetch_batch(&requests).await.into_iter();

        let mut rows = Vec::with_capacity(working_set.len());
        let mut spots = Vec::with_capacity(working_set.len());
        let mut missing_spot_count = 0;

        for instrument in &working_set {
            let instrument_fixings: Vec<PriceFixing> = fixings
                .by_ref()
                .take(instrument.fixing_dates.len())
                .collect();
            let spot = compute_spot(
                instrument_fixings.iter().map(|f| f.observed_price),
                policy,
            );

            if spot.is_none() {
                missing_spot_count += 1;
                warn!("No spot for {}: every fixing is absent", instrument.resolved_symbol);
                warnings.push(ReportWarning::MissingSpot {
                    symbol: instrument.resolved_symbol.clone(),
                });
            }

            let result = SpotResult {
                fixings: instrument_fixings,
                spot,
            };
            rows.push(ReportRow::new(
                instrument,
                &result,
                effective_weight(instrument.weight),
            ));
            spots.push((spot, instrument.weight));
        }

        let any_spot = spots.iter().any(|(spot, _)| spot.is_some());
        let global_spot = compute_global_spot(spots);
        match (global_spot, any_spot) {
            (Some(_), _) => {}
            (None, true) => warnings.push(ReportWarning::GlobalSpotOverflow),
            (None, false) => warnings.push(ReportWarning::GlobalSpotUndefined),
        }

        info!(
            "Computed {} report for {} instruments: global spot {}",
            policy,
            rows.len(),
            display_spot(global_spot)
        );

        Ok(SpotReport {
            rows,
            global_spot,
            global_spot_display: display_spot(global_spot),
            policy,
            policy_label: policy.label().to_string(),
            warnings,
            missing_spot_count,
        })
    }

    fn default_policy(&self) -> SpotPolicy {
        self.default_policy
    }
}

fn validate_weight(input: &str, weight: f64) -> Result<Decimal> {
    match Decimal::from_f64(weight) {
        Some(value) if value >= Decimal::ZERO && value <= Decimal::from(MAX_WEIGHT) => Ok(value),
        _ => Err(ValidationError::InvalidWeight {
            input: input.to_string(),
            weight,
            max: MAX_WEIGHT,
        }
        .into()),
    }
}
