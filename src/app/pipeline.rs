//! Shared "report pipeline" used by every CLI subcommand that prints tables.
//!
//! amounts -> create weights -> effective attempt -> phase outcomes -> end-to-end
//!
//! Printing and exports only consume the resulting `ReportRun`.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{AmountRow, ConfirmRow, ReportConfig};
use crate::error::AppError;
use crate::models::{confirm_weights, create_weights, effective_attempt};
use crate::outcome::{compose, final_outcome_confirm, final_outcome_create};

/// All computed outputs of a single `checkout report` run.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub max_attempts: u32,
    pub confirm: ConfirmRow,
    /// One row per configured price point, in configuration order.
    pub rows: Vec<AmountRow>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_report(config: &ReportConfig) -> Result<ReportRun, AppError> {
    debug!(
        amounts = config.price_points.len(),
        max_attempts = config.max_attempts,
        "computing report"
    );

    let confirm = confirm_row(config.max_attempts);

    // Amounts are independent; collect keeps the input order.
    let rows = config
        .price_points
        .par_iter()
        .map(|&amount| amount_row(amount, &confirm, config.max_attempts))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportRun {
        max_attempts: config.max_attempts,
        confirm,
        rows,
    })
}

pub fn confirm_row(max_attempts: u32) -> ConfirmRow {
    let weights = confirm_weights();
    ConfirmRow {
        weights,
        effective: effective_attempt(&weights),
        outcome: final_outcome_confirm(max_attempts),
    }
}

/// Compute one report row, reusing the amount-independent confirm figures.
pub fn amount_row(amount: f64, confirm: &ConfirmRow, max_attempts: u32) -> Result<AmountRow, AppError> {
    let weights = create_weights(amount, 0)?;
    let create_outcome = final_outcome_create(amount, max_attempts)?;
    let end_to_end = compose(&create_outcome, &confirm.outcome);
    debug!(amount, success = end_to_end.success, "amount row computed");

    Ok(AmountRow {
        amount,
        create_weights: weights,
        create_effective: effective_attempt(&weights),
        create_outcome,
        end_to_end,
    })
}
