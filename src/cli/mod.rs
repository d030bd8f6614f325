//! Command-line parsing for the checkout outcome model.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the probability model.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_DEGRADATION_AMOUNTS, DEFAULT_DEGRADATION_ATTEMPTS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "checkout",
    version,
    about = "Create/confirm checkout outcome probabilities under bounded retries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every outcome table for a set of amounts and optionally export them.
    Report(ReportArgs),
    /// Show create weights (and the effective attempt) for one amount and attempt.
    Weights(WeightsArgs),
    /// Show final create and confirm phase outcomes for one amount.
    Phase(AmountArgs),
    /// Show the end-to-end outcome for one amount.
    EndToEnd(AmountArgs),
}

/// Options for the full report.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Amounts to tabulate (comma-separated). Falls back to `CHECKOUT_PRICE_POINTS`.
    #[arg(long, value_delimiter = ',')]
    pub amounts: Option<Vec<f64>>,

    /// Attempts allowed per phase. Falls back to `CHECKOUT_MAX_ATTEMPTS`, then 3.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Attempt indices shown in the degradation table.
    #[arg(long, default_value_t = DEFAULT_DEGRADATION_ATTEMPTS)]
    pub degradation_attempts: u32,

    /// Amounts shown in the degradation table (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_DEGRADATION_AMOUNTS)]
    pub degradation_amounts: Vec<f64>,

    /// Export the full report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export end-to-end rows to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// Options for a single create-weight lookup.
#[derive(Debug, Parser, Clone)]
pub struct WeightsArgs {
    /// Transaction amount.
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub amount: f64,

    /// Same-record attempts already made (0 on the first attempt).
    #[arg(long, default_value_t = 0)]
    pub attempt: u32,
}

/// Options for single-amount outcome commands.
#[derive(Debug, Parser, Clone)]
pub struct AmountArgs {
    /// Transaction amount.
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub amount: f64,

    /// Attempts allowed per phase. Falls back to `CHECKOUT_MAX_ATTEMPTS`, then 3.
    #[arg(long)]
    pub max_attempts: Option<u32>,
}
