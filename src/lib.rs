//! `checkout-odds` library crate.
//!
//! Closed-form outcome probabilities for a two-phase (create → confirm) checkout
//! where each SDK call may resolve immediately, defer to a webhook, ask for a
//! retry, or flag fraud.
//!
//! The binary (`checkout`) is a thin wrapper around this library so that:
//!
//! - the model is testable without spawning processes
//! - report rendering only consumes the numeric interface

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod outcome;
pub mod report;

pub use models::{confirm_weights, create_weights, effective_attempt};
pub use outcome::{end_to_end, final_outcome_confirm, final_outcome_create};
