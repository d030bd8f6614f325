//! End-to-end composition of the create and confirm phases.
//!
//! Confirm is only entered once create has succeeded, so every confirm outcome is
//! scaled by `create.success`. Create fraud and create exhaustion terminate the
//! workflow before confirm is reached.

use crate::domain::{DEFAULT_MAX_ATTEMPTS, EndToEndOutcome, PhaseOutcome};
use crate::error::AppError;
use crate::outcome::aggregate::{final_outcome_confirm, final_outcome_create};

/// End-to-end outcome with the default retry budget on both phases.
pub fn end_to_end(amount: f64) -> Result<EndToEndOutcome, AppError> {
    end_to_end_with(amount, DEFAULT_MAX_ATTEMPTS)
}

/// End-to-end outcome with `max_attempts` attempts allowed per phase.
pub fn end_to_end_with(amount: f64, max_attempts: u32) -> Result<EndToEndOutcome, AppError> {
    let create = final_outcome_create(amount, max_attempts)?;
    let confirm = final_outcome_confirm(max_attempts);
    Ok(compose(&create, &confirm))
}

/// Combine two already-aggregated phases.
pub fn compose(create: &PhaseOutcome, confirm: &PhaseOutcome) -> EndToEndOutcome {
    EndToEndOutcome {
        success: create.success * confirm.success,
        create_fraud: create.fraud,
        confirm_fraud: create.success * confirm.fraud,
        create_retry_exhaust: create.retry_exhausted,
        confirm_retry_exhaust: create.success * confirm.retry_exhausted,
    }
}
