//! Bounded retry aggregation.
//!
//! Each phase is a small absorbing chain:
//!
//! ```text
//! Attempt_0 -> Attempt_1 -> ... -> Attempt_{n-1} -> Exhausted
//!     |            |                   |
//!     +-> Success / Fraud (absorbing at every attempt)
//! ```
//!
//! `p_still_retrying` is the probability of reaching the current attempt. Every
//! attempt splits it into success, fraud, and the mass carried to the next one.
//! Whatever is still retrying after the last attempt is reported as exhausted.
//! The loop always runs all `max_attempts` iterations.

use crate::domain::{EffectiveAttempt, OutcomeWeights, Phase, PhaseOutcome};
use crate::error::AppError;
use crate::models::{confirm_weights, create_weights, effective_attempt, validate_amount};

impl Phase {
    /// Raw weights for the attempt after `attempt_index` prior attempts.
    pub fn weights_at(self, attempt_index: u32) -> Result<OutcomeWeights, AppError> {
        match self {
            Phase::Create { amount } => create_weights(amount, attempt_index),
            Phase::Confirm => Ok(confirm_weights()),
        }
    }
}

/// Aggregate a phase over its retry budget.
pub fn aggregate(phase: Phase, max_attempts: u32) -> Result<PhaseOutcome, AppError> {
    if let Phase::Create { amount } = phase {
        validate_amount(amount)?;
    }
    aggregate_with(|attempt| phase.weights_at(attempt), max_attempts)
}

/// Aggregate any per-attempt weight source over `max_attempts` attempts.
///
/// `weights_at` receives the attempt index (0 on the first attempt).
pub fn aggregate_with<F>(mut weights_at: F, max_attempts: u32) -> Result<PhaseOutcome, AppError>
where
    F: FnMut(u32) -> Result<OutcomeWeights, AppError>,
{
    let mut out = PhaseOutcome::UNATTEMPTED;
    for attempt in 0..max_attempts {
        let eff = effective_attempt(&weights_at(attempt)?);
        apply_attempt(&mut out, &eff);
    }
    Ok(out)
}

/// Advance the chain by one attempt.
fn apply_attempt(out: &mut PhaseOutcome, eff: &EffectiveAttempt) {
    let p_still_retrying = out.retry_exhausted;
    out.success += p_still_retrying * eff.success;
    out.fraud += p_still_retrying * eff.fraud;
    out.retry_exhausted = p_still_retrying * eff.retry;
}

/// Closed-form aggregation of an attempt distribution that never changes.
///
/// With `r = eff.retry` the chain is a truncated geometric series:
/// `success = s·(1 − rⁿ)/(1 − r)`, `fraud = f·(1 − rⁿ)/(1 − r)`, `exhausted = rⁿ`.
pub fn aggregate_constant(eff: &EffectiveAttempt, max_attempts: u32) -> PhaseOutcome {
    let exhausted = eff.retry.powf(f64::from(max_attempts));
    let leaving = 1.0 - eff.retry;
    if leaving <= 0.0 {
        // Every attempt retries; nothing ever leaves the chain.
        return PhaseOutcome::UNATTEMPTED;
    }

    let reached = (1.0 - exhausted) / leaving;
    PhaseOutcome {
        success: eff.success * reached,
        fraud: eff.fraud * reached,
        retry_exhausted: exhausted,
    }
}

/// Final create outcome for `amount` after up to `max_attempts` attempts.
pub fn final_outcome_create(amount: f64, max_attempts: u32) -> Result<PhaseOutcome, AppError> {
    aggregate(Phase::Create { amount }, max_attempts)
}

/// Final confirm outcome after up to `max_attempts` attempts.
///
/// Confirm weights never change, so this is infallible.
pub fn final_outcome_confirm(max_attempts: u32) -> PhaseOutcome {
    let eff = effective_attempt(&confirm_weights());
    let mut out = PhaseOutcome::UNATTEMPTED;
    for _ in 0..max_attempts {
        apply_attempt(&mut out, &eff);
    }
    out
}
