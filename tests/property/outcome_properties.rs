use checkout_odds::domain::{OutcomeWeights, PhaseOutcome};
use checkout_odds::models::{
    confirm_weights, create_raw_weights, create_weights, effective_attempt, DEFERRED,
};
use checkout_odds::outcome::{
    aggregate_constant, aggregate_with, end_to_end, end_to_end_with, final_outcome_confirm,
    final_outcome_create,
};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn arb_weights() -> impl Strategy<Value = OutcomeWeights> {
    (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0)
        .prop_filter("non-degenerate", |(a, b, c, d)| a + b + c + d > 1e-6)
        .prop_map(|(a, b, c, d)| {
            let total = a + b + c + d;
            OutcomeWeights {
                immediate: a / total,
                deferred: b / total,
                retry: c / total,
                fraud: d / total,
            }
        })
}

proptest! {
    #[test]
    fn create_weights_are_a_distribution(amount in 0.0f64..50_000.0, attempt in 0u32..200) {
        let w = create_weights(amount, attempt).unwrap();
        prop_assert!((w.total() - 1.0).abs() < TOL, "total = {}", w.total());
        prop_assert!(w.immediate >= 0.0 && w.deferred >= 0.0 && w.retry >= 0.0 && w.fraud >= 0.0);
    }

    #[test]
    fn raw_weights_stay_positive(amount in 0.0f64..50_000.0, attempt in 0u32..200) {
        let raw = create_raw_weights(amount, attempt).unwrap();
        prop_assert!(raw.immediate >= 0 && raw.deferred >= 0 && raw.retry >= 0 && raw.fraud >= 0);
        prop_assert!(raw.total() > 0);
    }

    #[test]
    fn high_amounts_degrade_with_attempts(amount in 5_000.01f64..50_000.0, attempt in 0u32..50) {
        let now = create_raw_weights(amount, attempt).unwrap();
        let next = create_raw_weights(amount, attempt + 1).unwrap();
        if now.immediate > 0 {
            prop_assert!(next.immediate < now.immediate);
        } else {
            prop_assert_eq!(next.immediate, 0);
        }
        prop_assert!(next.fraud > now.fraud);
    }

    #[test]
    fn effective_attempt_is_a_distribution(w in arb_weights()) {
        let eff = effective_attempt(&w);
        prop_assert!((eff.total() - 1.0).abs() < TOL, "total = {}", eff.total());
        prop_assert!(eff.success >= w.immediate);
        prop_assert!(eff.retry >= w.retry);
        prop_assert!(eff.fraud >= w.fraud);
    }

    #[test]
    fn create_phase_is_a_distribution(amount in 0.0f64..50_000.0, max_attempts in 0u32..25) {
        let out = final_outcome_create(amount, max_attempts).unwrap();
        prop_assert!((out.total() - 1.0).abs() < TOL, "total = {}", out.total());
        prop_assert!(out.success >= 0.0 && out.fraud >= 0.0 && out.retry_exhausted >= 0.0);
    }

    #[test]
    fn confirm_closed_form_matches_loop(max_attempts in 0u32..40) {
        let looped = final_outcome_confirm(max_attempts);
        let closed = aggregate_constant(&effective_attempt(&confirm_weights()), max_attempts);
        prop_assert!((looped.success - closed.success).abs() < 1e-12);
        prop_assert!((looped.fraud - closed.fraud).abs() < 1e-12);
        prop_assert!((looped.retry_exhausted - closed.retry_exhausted).abs() < 1e-12);
    }

    #[test]
    fn constant_source_closed_form_matches_loop(w in arb_weights(), max_attempts in 0u32..40) {
        let looped = aggregate_with(|_| Ok(w), max_attempts).unwrap();
        let closed = aggregate_constant(&effective_attempt(&w), max_attempts);
        prop_assert!((looped.success - closed.success).abs() < 1e-9);
        prop_assert!((looped.fraud - closed.fraud).abs() < 1e-9);
        prop_assert!((looped.retry_exhausted - closed.retry_exhausted).abs() < 1e-9);
    }

    #[test]
    fn end_to_end_is_a_distribution(amount in 0.0f64..50_000.0) {
        let e = end_to_end(amount).unwrap();
        prop_assert!((e.total() - 1.0).abs() < TOL, "total = {}", e.total());
    }

    #[test]
    fn end_to_end_any_budget_is_a_distribution(amount in 0.0f64..50_000.0, max_attempts in 0u32..15) {
        let e = end_to_end_with(amount, max_attempts).unwrap();
        prop_assert!((e.total() - 1.0).abs() < TOL, "total = {}", e.total());
    }

    #[test]
    fn negative_amounts_rejected(amount in -50_000.0f64..-1e-9, attempt in 0u32..5) {
        prop_assert!(create_weights(amount, attempt).is_err());
        prop_assert!(final_outcome_create(amount, 3).is_err());
        prop_assert!(end_to_end(amount).is_err());
    }
}

#[test]
fn deferred_resolver_sums_to_one() {
    assert!((DEFERRED.sum() - 1.0).abs() < 1e-15);
}

#[test]
fn zero_budget_is_fully_exhausted() {
    assert_eq!(final_outcome_confirm(0), PhaseOutcome::UNATTEMPTED);
    assert_eq!(final_outcome_create(12_345.0, 0).unwrap(), PhaseOutcome::UNATTEMPTED);
}
