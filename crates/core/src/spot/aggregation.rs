//! Per-instrument spot and weighted global spot.
//!
//! All arithmetic is done on unrounded `Decimal`s; rounding is a display
//! concern handled by [`round_for_display`].

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

use super::policy::SpotPolicy;

/// Combine one instrument's fixings under `policy`.
///
/// Absent fixings are ignored. Returns `None` when nothing was observed.
pub fn compute_spot<I>(fixings: I, policy: SpotPolicy) -> Option<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let values: Vec<Decimal> = fixings.into_iter().flatten().collect();
    if values.is_empty() {
        return None;
    }

    match policy {
        SpotPolicy::Mean => {
            let sum = values
                .iter()
                .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value));
            match sum {
                Some(sum) => sum.checked_div(Decimal::from(values.len())),
                None => {
                    warn!("Mean of {} fixings overflowed", values.len());
                    None
                }
            }
        }
        SpotPolicy::Max => values.into_iter().max(),
        SpotPolicy::Min => values.into_iter().min(),
    }
}

/// Zero means "equal weight" and counts as one.
pub fn effective_weight(weight: Decimal) -> Decimal {
    if weight > Decimal::ZERO {
        weight
    } else {
        Decimal::ONE
    }
}

/// Weighted average of the instruments that produced a spot.
///
/// Instruments without a spot contribute neither value nor weight. Returns
/// `None` when the total weight is zero or the weighted sum overflows.
pub fn compute_global_spot<I>(spots: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Option<Decimal>, Decimal)>,
{
    let mut weighted_sum = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    for (spot, weight) in spots {
        let Some(spot) = spot else { continue };
        let weight = effective_weight(weight);
        let accumulated = spot
            .checked_mul(weight)
            .and_then(|product| weighted_sum.checked_add(product))
            .zip(total_weight.checked_add(weight));
        match accumulated {
            Some((sum, total)) => {
                weighted_sum = sum;
                total_weight = total;
            }
            None => {
                warn!(
                    "Weighted global spot overflowed at spot {} weight {}",
                    spot, weight
                );
                return None;
            }
        }
    }

    if total_weight.is_zero() {
        None
    } else {
        weighted_sum.checked_div(total_weight)
    }
}

/// Round a spot for reporting.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointNearestEven,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn observed(values: &[Decimal]) -> Vec<Option<Decimal>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_policies() {
        let fixings = observed(&[dec!(100), dec!(200), dec!(300)]);
        assert_eq!(
            compute_spot(fixings.clone(), SpotPolicy::Mean),
            Some(dec!(200))
        );
        assert_eq!(
            compute_spot(fixings.clone(), SpotPolicy::Max),
            Some(dec!(300))
        );
        assert_eq!(compute_spot(fixings, SpotPolicy::Min), Some(dec!(100)));
    }

    #[test]
    fn test_empty_and_all_absent() {
        assert_eq!(compute_spot(Vec::new(), SpotPolicy::Mean), None);
        assert_eq!(compute_spot(vec![None, None], SpotPolicy::Max), None);
    }

    #[test]
    fn test_absent_fixings_are_ignored() {
        let fixings = vec![Some(dec!(10)), None, Some(dec!(20))];
        assert_eq!(compute_spot(fixings, SpotPolicy::Mean), Some(dec!(15)));
    }

    #[test]
    fn test_effective_weight() {
        assert_eq!(effective_weight(dec!(0)), dec!(1));
        assert_eq!(effective_weight(dec!(2.5)), dec!(2.5));
    }

    #[test]
    fn test_weighted_global_spot() {
        let global = compute_global_spot(vec![(Some(dec!(100)), dec!(0)), (Some(dec!(200)), dec!(2))])
            .unwrap();
        assert_eq!(round_for_display(global), dec!(166.666667));
    }

    #[test]
    fn test_instruments_without_spot_carry_no_weight() {
        let global =
            compute_global_spot(vec![(None, dec!(5)), (Some(dec!(42)), dec!(1))]).unwrap();
        assert_eq!(global, dec!(42));
    }

    #[test]
    fn test_global_spot_undefined_without_spots() {
        assert_eq!(compute_global_spot(vec![(None, dec!(1)), (None, dec!(0))]), None);
        assert_eq!(compute_global_spot(Vec::new()), None);
    }

    #[test]
    fn test_global_spot_uses_unrounded_spots() {
        // 1/3 and 2/3 average to exactly 0.5 only if neither is rounded first
        let third = dec!(1) / dec!(3);
        let two_thirds = dec!(2) / dec!(3);
        let global =
            compute_global_spot(vec![(Some(third), dec!(1)), (Some(two_thirds), dec!(1))]).unwrap();
        assert_eq!(round_for_display(global), dec!(0.5));
    }

    #[test]
    fn test_mean_overflow_is_absent() {
        let fixings = observed(&[Decimal::MAX, Decimal::MAX]);
        assert_eq!(compute_spot(fixings.clone(), SpotPolicy::Mean), None);
        assert_eq!(compute_spot(fixings, SpotPolicy::Max), Some(Decimal::MAX));
    }

    #[test]
    fn test_global_spot_overflow_is_undefined() {
        let spots = vec![(Some(Decimal::MAX), dec!(10)), (Some(dec!(170)), dec!(1))];
        assert_eq!(compute_global_spot(spots), None);
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(dec!(1.23456789)), dec!(1.234568));
        assert_eq!(round_for_display(dec!(2)), dec!(2));
    }
}
