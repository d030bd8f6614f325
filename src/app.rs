//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments and environment settings
//! - runs the outcome model
//! - prints tables
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{AmountArgs, Command, ReportArgs, WeightsArgs};
use crate::domain::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PRICE_POINTS, ReportConfig};
use crate::error::AppError;
use crate::models::{create_weights, validate_amount};
use crate::outcome::{end_to_end_with, final_outcome_confirm, final_outcome_create};

pub mod pipeline;

/// Environment variable holding comma-separated report amounts.
pub const ENV_PRICE_POINTS: &str = "CHECKOUT_PRICE_POINTS";
/// Environment variable holding the per-phase retry budget.
pub const ENV_MAX_ATTEMPTS: &str = "CHECKOUT_MAX_ATTEMPTS";

/// Entry point for the `checkout` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry RUST_LOG, so load it before installing the subscriber.
    dotenvy::dotenv().ok();
    init_tracing(log_filter(env_value("RUST_LOG")));

    // `checkout` and `checkout --amounts ...` behave like `checkout report ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Weights(args) => handle_weights(args),
        Command::Phase(args) => handle_phase(args),
        Command::EndToEnd(args) => handle_end_to_end(args),
    }
}

/// Log to stderr with the given filter.
fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter from a `RUST_LOG`-style directive string (default `warn`).
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args)?;
    let run = pipeline::run_report(&config)?;

    println!(
        "{}",
        crate::report::format_report(&run, &config.degradation_amounts, config.degradation_attempts)?
    );

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::export::write_report_json(path, &run)?;
        info!(path = %path.display(), "report JSON written");
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_end_to_end_csv(path, &run)?;
        info!(path = %path.display(), "end-to-end CSV written");
    }

    Ok(())
}

fn handle_weights(args: WeightsArgs) -> Result<(), AppError> {
    let weights = create_weights(args.amount, args.attempt)?;
    print!(
        "{}",
        crate::report::format_weights_detail(args.amount, args.attempt, &weights)
    );
    Ok(())
}

fn handle_phase(args: AmountArgs) -> Result<(), AppError> {
    let max_attempts = resolve_max_attempts(args.max_attempts, env_value(ENV_MAX_ATTEMPTS))?;
    let create = final_outcome_create(args.amount, max_attempts)?;
    let confirm = final_outcome_confirm(max_attempts);
    print!(
        "{}",
        crate::report::format_phase_detail(args.amount, max_attempts, &create, &confirm)
    );
    Ok(())
}

fn handle_end_to_end(args: AmountArgs) -> Result<(), AppError> {
    let max_attempts = resolve_max_attempts(args.max_attempts, env_value(ENV_MAX_ATTEMPTS))?;
    print!("{}", end_to_end_detail(args.amount, max_attempts)?);
    Ok(())
}

fn end_to_end_detail(amount: f64, max_attempts: u32) -> Result<String, AppError> {
    let e = end_to_end_with(amount, max_attempts)?;
    Ok(crate::report::format_end_to_end_detail(amount, &e))
}

/// Resolve a full report configuration from flags, then environment, then defaults.
pub fn report_config_from_args(args: &ReportArgs) -> Result<ReportConfig, AppError> {
    let price_points = resolve_price_points(args.amounts.clone(), env_value(ENV_PRICE_POINTS))?;
    let max_attempts = resolve_max_attempts(args.max_attempts, env_value(ENV_MAX_ATTEMPTS))?;

    for &amount in price_points.iter().chain(&args.degradation_amounts) {
        validate_amount(amount)?;
    }

    Ok(ReportConfig {
        price_points,
        degradation_amounts: args.degradation_amounts.clone(),
        degradation_attempts: args.degradation_attempts,
        max_attempts,
        export_json: args.export.clone(),
        export_csv: args.export_csv.clone(),
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Flag value wins; otherwise parse the environment value; otherwise defaults.
pub fn resolve_price_points(flag: Option<Vec<f64>>, env: Option<String>) -> Result<Vec<f64>, AppError> {
    if let Some(points) = flag {
        return Ok(points);
    }
    let Some(raw) = env else {
        return Ok(DEFAULT_PRICE_POINTS.to_vec());
    };

    raw.split(',')
        .map(|part| {
            let part = part.trim().replace('_', "");
            part.parse::<f64>().map_err(|_| {
                AppError::config(format!("Invalid {ENV_PRICE_POINTS} entry '{part}': expected a number."))
            })
        })
        .collect()
}

/// Flag value wins; otherwise parse the environment value; otherwise 3.
pub fn resolve_max_attempts(flag: Option<u32>, env: Option<String>) -> Result<u32, AppError> {
    if let Some(n) = flag {
        return Ok(n);
    }
    match env {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            AppError::config(format!(
                "Invalid {ENV_MAX_ATTEMPTS} '{raw}': expected a non-negative integer."
            ))
        }),
        None => Ok(DEFAULT_MAX_ATTEMPTS),
    }
}

/// Rewrite argv so `checkout` defaults to `checkout report`.
///
/// Rules:
/// - `checkout`                        -> `checkout report`
/// - `checkout --amounts 100,200 ...`  -> `checkout report --amounts 100,200 ...`
/// - `checkout --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "weights" | "phase" | "end-to-end");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
