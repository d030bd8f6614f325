//! Domain types used throughout the model.
//!
//! This module defines:
//!
//! - probability distributions at each stage (`OutcomeWeights`, `EffectiveAttempt`,
//!   `PhaseOutcome`, `EndToEndOutcome`)
//! - the phase selector consumed by the retry aggregator (`Phase`)
//! - run configuration and the export schema (`ReportConfig`, `ReportFile`)

pub mod types;

pub use types::*;
