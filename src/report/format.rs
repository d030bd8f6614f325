//! Formatted terminal output for the outcome model.
//!
//! We keep formatting code in one place so:
//! - the model code stays purely numeric and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! Every function returns a `String`; printing is the caller's job.

use crate::app::pipeline::ReportRun;
use crate::domain::{AmountRow, ConfirmRow, EffectiveAttempt, EndToEndOutcome, OutcomeWeights, PhaseOutcome};
use crate::error::AppError;
use crate::models::{create_weights, effective_attempt};

const DIVIDER_WIDTH: usize = 80;

/// Format every report table for a computed run.
pub fn format_report(
    run: &ReportRun,
    degradation_amounts: &[f64],
    degradation_attempts: u32,
) -> Result<String, AppError> {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format_raw_create_weights(&run.rows));
    out.push_str(&format_weight_degradation(degradation_amounts, degradation_attempts)?);
    out.push_str(&format_effective_attempts(&run.rows, &run.confirm));
    out.push_str(&format_final_outcomes(&run.rows, &run.confirm, run.max_attempts));
    out.push_str(&format_end_to_end(&run.rows));
    Ok(out)
}

/// Table 1: raw create weights on the first attempt.
pub fn format_raw_create_weights(rows: &[AmountRow]) -> String {
    let mut out = heading("TABLE 1: Raw SDK Weights - checkout.create() (first attempt, sameRecords=0)");
    push_line(
        &mut out,
        format!(
            "{:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
            "Amount", "Immediate", "Deferred", "Retry", "Fraud"
        ),
    );
    push_line(&mut out, "-".repeat(62));
    for row in rows {
        push_line(
            &mut out,
            format!("{} | {}", fmt_amount(row.amount), weight_cells(&row.create_weights)),
        );
    }
    out.push('\n');
    out
}

/// Table 2: how create weights degrade as same-record attempts accumulate.
pub fn format_weight_degradation(amounts: &[f64], attempts: u32) -> Result<String, AppError> {
    let joined: Vec<String> = amounts.iter().map(|a| format!("${}", group_thousands(*a))).collect();
    let mut out = heading(&format!(
        "TABLE 2: Create Weight Degradation Over Retries (amount={})",
        joined.join(" vs ")
    ));

    for &amount in amounts {
        out.push('\n');
        push_line(&mut out, format!("  Amount = ${}", group_thousands(amount)));
        push_line(
            &mut out,
            format!(
                "  {:>8} | {:>10} | {:>10} | {:>10} | {:>10}",
                "Attempt", "Immediate", "Deferred", "Retry", "Fraud"
            ),
        );
        push_line(&mut out, format!("  {}", "-".repeat(60)));
        for attempt in 0..attempts {
            let w = create_weights(amount, attempt)?;
            push_line(&mut out, format!("  {attempt:>8} | {}", weight_cells(&w)));
        }
    }
    out.push('\n');
    Ok(out)
}

/// Table 3: effective single-attempt probabilities.
pub fn format_effective_attempts(rows: &[AmountRow], confirm: &ConfirmRow) -> String {
    let mut out = heading("TABLE 3: Effective Single-Attempt Probabilities (SDK + Webhook Resolution)");
    push_line(
        &mut out,
        format!("{:>10} | {:>10} | {:>10} | {:>10}", "Amount", "Success", "Retry", "Fraud"),
    );
    push_line(&mut out, "-".repeat(48));
    for row in rows {
        push_line(
            &mut out,
            format!("{} | {}", fmt_amount(row.amount), effective_cells(&row.create_effective)),
        );
    }
    out.push('\n');
    push_line(
        &mut out,
        format!(
            "  {:>9} | {}   (fixed, all amounts)",
            "Confirm",
            effective_cells(&confirm.effective)
        ),
    );
    out.push('\n');
    out
}

/// Table 4: final create outcome after the retry budget, plus the fixed confirm row.
pub fn format_final_outcomes(rows: &[AmountRow], confirm: &ConfirmRow, max_attempts: u32) -> String {
    let mut out = heading(&format!(
        "TABLE 4: Final Create Outcome After Up To {max_attempts} Retries"
    ));
    push_line(
        &mut out,
        format!("{:>10} | {:>10} | {:>10} | {:>10}", "Amount", "Success", "Fraud", "Exhausted"),
    );
    push_line(&mut out, "-".repeat(48));
    for row in rows {
        push_line(
            &mut out,
            format!("{} | {}", fmt_amount(row.amount), phase_cells(&row.create_outcome)),
        );
    }
    out.push('\n');
    push_line(&mut out, "  Confirm (fixed):".to_string());
    push_line(&mut out, format!("  {:>9} | {}", "All", phase_cells(&confirm.outcome)));
    out.push('\n');
    out
}

/// Table 5: end-to-end outcome across both phases.
pub fn format_end_to_end(rows: &[AmountRow]) -> String {
    let mut out = heading("TABLE 5: End-to-End Outcome (Create + Confirm)");
    push_line(
        &mut out,
        format!(
            "{:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
            "Amount", "Success", "Create", "Confirm", "Create", "Confirm"
        ),
    );
    push_line(
        &mut out,
        format!(
            "{:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
            "", "", "Fraud", "Fraud", "Exhaust", "Exhaust"
        ),
    );
    push_line(&mut out, "-".repeat(72));
    for row in rows {
        push_line(
            &mut out,
            format!("{} | {}", fmt_amount(row.amount), end_to_end_cells(&row.end_to_end)),
        );
    }
    out.push('\n');
    out
}

/// Detail view for `checkout weights`.
pub fn format_weights_detail(amount: f64, attempt_index: u32, weights: &OutcomeWeights) -> String {
    let eff = effective_attempt(weights);
    let mut out = String::new();
    push_line(
        &mut out,
        format!("Create weights: amount=${} attempt={attempt_index}", group_thousands(amount)),
    );
    push_line(&mut out, format!("  immediate {}", pct(weights.immediate)));
    push_line(&mut out, format!("  deferred  {}", pct(weights.deferred)));
    push_line(&mut out, format!("  retry     {}", pct(weights.retry)));
    push_line(&mut out, format!("  fraud     {}", pct(weights.fraud)));
    push_line(&mut out, "Effective attempt:".to_string());
    push_line(&mut out, format!("  success   {}", pct(eff.success)));
    push_line(&mut out, format!("  retry     {}", pct(eff.retry)));
    push_line(&mut out, format!("  fraud     {}", pct(eff.fraud)));
    out
}

/// Detail view for `checkout phase`.
pub fn format_phase_detail(
    amount: f64,
    max_attempts: u32,
    create: &PhaseOutcome,
    confirm: &PhaseOutcome,
) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!("Phase outcomes: amount=${} max_attempts={max_attempts}", group_thousands(amount)),
    );
    push_line(
        &mut out,
        format!("{:>10} | {:>10} | {:>10} | {:>10}", "Phase", "Success", "Fraud", "Exhausted"),
    );
    push_line(&mut out, "-".repeat(48));
    push_line(&mut out, format!("{:>10} | {}", "Create", phase_cells(create)));
    push_line(&mut out, format!("{:>10} | {}", "Confirm", phase_cells(confirm)));
    out
}

/// Detail view for `checkout end-to-end`.
pub fn format_end_to_end_detail(amount: f64, e: &EndToEndOutcome) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("End-to-end outcome: amount=${}", group_thousands(amount)));
    push_line(&mut out, format!("  success                {}", pct(e.success)));
    push_line(&mut out, format!("  create fraud           {}", pct(e.create_fraud)));
    push_line(&mut out, format!("  confirm fraud          {}", pct(e.confirm_fraud)));
    push_line(&mut out, format!("  create retry exhaust   {}", pct(e.create_retry_exhaust)));
    push_line(&mut out, format!("  confirm retry exhaust  {}", pct(e.confirm_retry_exhaust)));
    out
}

/// Probability as a fixed-width percentage, e.g. `" 59.00%"`.
pub fn pct(v: f64) -> String {
    format!("{:6.2}%", v * 100.0)
}

/// Amount with thousands separators; whole amounts drop the cents.
pub fn group_thousands(amount: f64) -> String {
    let text = format!("{:.2}", amount.abs());
    let (digits, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if amount < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount.fract() != 0.0 {
        grouped.push('.');
        grouped.push_str(cents);
    }
    grouped
}

fn fmt_amount(amount: f64) -> String {
    format!("${:>8}", group_thousands(amount))
}

fn weight_cells(w: &OutcomeWeights) -> String {
    format!(
        "{:>10} | {:>10} | {:>10} | {:>10}",
        pct(w.immediate),
        pct(w.deferred),
        pct(w.retry),
        pct(w.fraud)
    )
}

fn effective_cells(eff: &EffectiveAttempt) -> String {
    format!(
        "{:>10} | {:>10} | {:>10}",
        pct(eff.success),
        pct(eff.retry),
        pct(eff.fraud)
    )
}

fn phase_cells(p: &PhaseOutcome) -> String {
    format!(
        "{:>10} | {:>10} | {:>10}",
        pct(p.success),
        pct(p.fraud),
        pct(p.retry_exhausted)
    )
}

fn end_to_end_cells(e: &EndToEndOutcome) -> String {
    format!(
        "{:>10} | {:>10} | {:>10} | {:>10} | {:>10}",
        pct(e.success),
        pct(e.create_fraud),
        pct(e.confirm_fraud),
        pct(e.create_retry_exhaust),
        pct(e.confirm_retry_exhaust)
    )
}

fn heading(title: &str) -> String {
    let mut out = String::new();
    push_line(&mut out, "=".repeat(DIVIDER_WIDTH));
    push_line(&mut out, title.to_string());
    push_line(&mut out, "=".repeat(DIVIDER_WIDTH));
    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}
