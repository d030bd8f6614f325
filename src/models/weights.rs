//! Raw SDK outcome weights for `checkout.create()` and `checkout.confirm()`.
//!
//! Create weights are state dependent: `attempt_index` counts the same-record
//! attempts already made, and each one shifts mass from `immediate` towards
//! `retry`/`fraud`. Larger amounts add tiered surcharges on top. Confirm weights
//! are a constant.

use crate::domain::{OutcomeWeights, RawOutcomeWeights};
use crate::error::AppError;

/// Amount above which deferred/retry surcharges apply.
pub const TIER_1_AMOUNT: f64 = 1_000.0;
/// Amount above which immediate is cut and retry/fraud surcharges apply.
pub const TIER_2_AMOUNT: f64 = 5_000.0;
/// Amount above which an extra fraud surcharge applies.
pub const TIER_3_AMOUNT: f64 = 10_000.0;

/// Fixed confirm distribution (independent of amount and attempt).
pub const CONFIRM_WEIGHTS: OutcomeWeights = OutcomeWeights {
    immediate: 0.35,
    deferred: 0.30,
    retry: 0.30,
    fraud: 0.05,
};

/// Clamped, un-normalized create weights.
///
/// Tiers are cumulative: an amount above 10 000 receives all three surcharges.
pub fn create_raw_weights(amount: f64, attempt_index: u32) -> Result<RawOutcomeWeights, AppError> {
    validate_amount(amount)?;
    let s = i64::from(attempt_index);

    let mut immediate = 65 - 10 * s;
    let mut deferred = 20 + 5 * s;
    let mut retry = 10 + 5 * s;
    let mut fraud = 15 * s;

    if amount > TIER_1_AMOUNT {
        deferred += 5 * s + 10;
        retry += 5 * s + 10;
    }

    if amount > TIER_2_AMOUNT {
        immediate -= 5 * s + 15;
        retry += 5 * s + 30;
        fraud += 10 * s;
    }

    if amount > TIER_3_AMOUNT {
        fraud += 30 * s;
    }

    Ok(RawOutcomeWeights {
        immediate: immediate.max(0),
        deferred: deferred.max(0),
        retry: retry.max(0),
        fraud: fraud.max(0),
    })
}

/// Normalized create weights for the given amount and prior attempt count.
pub fn create_weights(amount: f64, attempt_index: u32) -> Result<OutcomeWeights, AppError> {
    create_raw_weights(amount, attempt_index).map(OutcomeWeights::from)
}

pub fn confirm_weights() -> OutcomeWeights {
    CONFIRM_WEIGHTS
}

/// Reject amounts the tier rules are not defined for.
pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::invalid_argument(format!(
            "Invalid amount: {amount} (must be finite and >= 0)."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn small_amount_first_attempt_has_no_surcharges() {
        let raw = create_raw_weights(100.0, 0).unwrap();
        assert_eq!(
            raw,
            RawOutcomeWeights {
                immediate: 65,
                deferred: 20,
                retry: 10,
                fraud: 0
            }
        );
        assert_eq!(raw.total(), 95);

        let w = create_weights(100.0, 0).unwrap();
        assert_close(w.immediate, 65.0 / 95.0);
        assert_close(w.deferred, 20.0 / 95.0);
        assert_close(w.retry, 10.0 / 95.0);
        assert_eq!(w.fraud, 0.0);
        assert!((w.immediate - 0.6842).abs() < 1e-4);
        assert!((w.deferred - 0.2105).abs() < 1e-4);
        assert!((w.retry - 0.1053).abs() < 1e-4);
    }

    #[test]
    fn mid_tier_amount_stacks_two_tiers() {
        let raw = create_raw_weights(7_500.0, 0).unwrap();
        assert_eq!(
            raw,
            RawOutcomeWeights {
                immediate: 50,
                deferred: 30,
                retry: 50,
                fraud: 0
            }
        );
        assert_eq!(raw.total(), 130);
    }

    #[test]
    fn mid_tier_amount_later_attempt() {
        // s = 1: immediate 55-20, deferred 25+15, retry 15+15+35, fraud 15+10.
        let raw = create_raw_weights(7_500.0, 1).unwrap();
        assert_eq!(
            raw,
            RawOutcomeWeights {
                immediate: 35,
                deferred: 40,
                retry: 65,
                fraud: 25
            }
        );
    }

    #[test]
    fn tier_thresholds_are_strict() {
        assert_eq!(create_raw_weights(1_000.0, 0).unwrap(), create_raw_weights(0.0, 0).unwrap());
        assert_ne!(create_raw_weights(1_000.01, 0).unwrap(), create_raw_weights(0.0, 0).unwrap());
        assert_eq!(create_raw_weights(10_000.0, 2).unwrap(), create_raw_weights(7_500.0, 2).unwrap());
        assert!(create_raw_weights(10_001.0, 2).unwrap().fraud > create_raw_weights(10_000.0, 2).unwrap().fraud);
    }

    #[test]
    fn immediate_clamps_to_zero_at_high_attempts() {
        // 65 - 10*s - (5*s + 15) goes negative from s = 4.
        let raw = create_raw_weights(15_000.0, 4).unwrap();
        assert_eq!(raw.immediate, 0);
        assert!(raw.fraud > 0);

        let w = create_weights(15_000.0, 4).unwrap();
        assert_eq!(w.immediate, 0.0);
        assert_close(w.total(), 1.0);
    }

    #[test]
    fn fraud_share_grows_towards_one_for_large_amounts() {
        // Fraud escalates without bound while immediate is floored at zero.
        let early = create_weights(15_000.0, 5).unwrap().fraud;
        let late = create_weights(15_000.0, 500).unwrap().fraud;
        assert!(late > early);
        assert!(late > 0.5);
    }

    #[test]
    fn confirm_weights_are_a_distribution() {
        assert_close(confirm_weights().total(), 1.0);
        assert_eq!(confirm_weights(), CONFIRM_WEIGHTS);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = create_weights(-1.0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(create_weights(f64::NAN, 0).is_err());
        assert!(create_weights(f64::INFINITY, 0).is_err());
    }
}
