//! Property-based tests for spot aggregation.
//!
//! These tests check invariants of the aggregation engine over random
//! fixings and weights, using the `proptest` crate.

use proptest::prelude::*;
use rust_decimal::Decimal;
use spotfix_core::fixings::split_date_lines;
use spotfix_core::spot::{compute_global_spot, compute_spot, round_for_display};
use spotfix_core::SpotPolicy;

// =============================================================================
// Generators
// =============================================================================

/// Positive price with up to four decimals.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000, 0u32..=4).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// A fixing that is absent one time in four.
fn arb_fixing() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        1 => Just(None::<Decimal>),
        3 => arb_price().prop_map(Some),
    ]
}

fn arb_fixings() -> impl Strategy<Value = Vec<Option<Decimal>>> {
    proptest::collection::vec(arb_fixing(), 0..12)
}

/// Spot with a weight between 0 (equal weight) and 50.
fn arb_weighted_spot() -> impl Strategy<Value = (Option<Decimal>, Decimal)> {
    (arb_fixing(), 0i64..=50).prop_map(|(spot, weight)| (spot, Decimal::from(weight)))
}

fn arb_policy() -> impl Strategy<Value = SpotPolicy> {
    prop_oneof![
        Just(SpotPolicy::Mean),
        Just(SpotPolicy::Max),
        Just(SpotPolicy::Min),
    ]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A spot exists exactly when at least one fixing was observed.
    #[test]
    fn prop_spot_present_iff_any_observed(fixings in arb_fixings(), policy in arb_policy()) {
        let any_observed = fixings.iter().any(Option::is_some);
        let spot = compute_spot(fixings, policy);
        prop_assert_eq!(spot.is_some(), any_observed);
    }

    /// Min <= Mean <= Max, and Max/Min are observed values.
    #[test]
    fn prop_policies_are_ordered(fixings in arb_fixings()) {
        let observed: Vec<Decimal> = fixings.iter().flatten().copied().collect();
        prop_assume!(!observed.is_empty());

        let mean = compute_spot(fixings.clone(), SpotPolicy::Mean).unwrap();
        let max = compute_spot(fixings.clone(), SpotPolicy::Max).unwrap();
        let min = compute_spot(fixings, SpotPolicy::Min).unwrap();

        prop_assert!(min <= mean);
        prop_assert!(mean <= max);
        prop_assert!(observed.contains(&max));
        prop_assert!(observed.contains(&min));
    }

    /// Absent fixings do not change the result.
    #[test]
    fn prop_absent_fixings_are_ignored(fixings in arb_fixings(), policy in arb_policy()) {
        let observed: Vec<Option<Decimal>> =
            fixings.iter().filter(|f| f.is_some()).copied().collect();
        prop_assert_eq!(compute_spot(fixings, policy), compute_spot(observed, policy));
    }

    /// The global spot lies between the smallest and largest instrument spot.
    #[test]
    fn prop_global_spot_within_bounds(spots in proptest::collection::vec(arb_weighted_spot(), 0..10)) {
        let present: Vec<Decimal> = spots.iter().filter_map(|(spot, _)| *spot).collect();
        let global = compute_global_spot(spots);

        match (present.iter().min(), present.iter().max()) {
            (Some(lo), Some(hi)) => {
                let global = global.unwrap();
                prop_assert!(*lo <= global && global <= *hi);
            }
            _ => prop_assert!(global.is_none()),
        }
    }

    /// A zero weight behaves exactly like a weight of one.
    #[test]
    fn prop_zero_weight_is_equal_weight(spots in proptest::collection::vec(arb_fixing(), 1..10)) {
        let zero: Vec<(Option<Decimal>, Decimal)> =
            spots.iter().map(|s| (*s, Decimal::ZERO)).collect();
        let one: Vec<(Option<Decimal>, Decimal)> =
            spots.iter().map(|s| (*s, Decimal::ONE)).collect();
        prop_assert_eq!(compute_global_spot(zero), compute_global_spot(one));
    }

    /// Display rounding keeps at most six decimals and moves the value by
    /// at most half a unit in the last place.
    #[test]
    fn prop_display_rounding(fixings in arb_fixings()) {
        if let Some(spot) = compute_spot(fixings, SpotPolicy::Mean) {
            let rounded = round_for_display(spot);
            prop_assert!(rounded.scale() <= 6);
            prop_assert!((rounded - spot).abs() <= Decimal::new(5, 7));
        }
    }

    /// Every identifier and label parses back to its policy.
    #[test]
    fn prop_policy_ids_round_trip(policy in arb_policy()) {
        prop_assert_eq!(SpotPolicy::parse_lenient(policy.id()), policy);
        prop_assert_eq!(SpotPolicy::parse_lenient(policy.label()), policy);
    }

    /// Unknown policy strings fall back to the mean.
    #[test]
    fn prop_unknown_policy_is_mean(raw in "[a-z]{0,6}[0-9]{1,3}") {
        prop_assert_eq!(SpotPolicy::parse_lenient(&raw), SpotPolicy::Mean);
    }

    /// Date lines come back trimmed and never blank.
    #[test]
    fn prop_date_lines_trimmed(lines in proptest::collection::vec("[ \t]{0,2}[0-9/]{0,10}[ \t]{0,2}", 0..8)) {
        let text = lines.join("\n");
        let dates = split_date_lines(&text);
        prop_assert!(dates.iter().all(|d| !d.is_empty() && d.trim() == d));
        prop_assert_eq!(dates.len(), lines.iter().filter(|l| !l.trim().is_empty()).count());
    }
}
