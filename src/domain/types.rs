//! Shared domain types.
//!
//! Every distribution here is a small `Copy` value object. They are serializable so
//! the same structs can be:
//!
//! - produced by the pure model functions
//! - rendered into report tables
//! - exported to JSON and reloaded later

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default report amounts (in currency units).
pub const DEFAULT_PRICE_POINTS: [f64; 7] = [100.0, 500.0, 2_000.0, 5_000.0, 7_500.0, 10_000.0, 15_000.0];

/// Amounts shown in the create-weight degradation table.
pub const DEFAULT_DEGRADATION_AMOUNTS: [f64; 2] = [100.0, 7_500.0];

/// Client-side retry budget per phase.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Number of attempt indices shown in the degradation table.
pub const DEFAULT_DEGRADATION_ATTEMPTS: u32 = 4;

/// Clamped, un-normalized create weights.
///
/// The create rules work in whole weight units, so these stay integral until
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutcomeWeights {
    pub immediate: i64,
    pub deferred: i64,
    pub retry: i64,
    pub fraud: i64,
}

impl RawOutcomeWeights {
    pub fn total(&self) -> i64 {
        self.immediate + self.deferred + self.retry + self.fraud
    }
}

/// Normalized 4-way raw outcome distribution of a single SDK call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeWeights {
    pub immediate: f64,
    pub deferred: f64,
    pub retry: f64,
    pub fraud: f64,
}

impl OutcomeWeights {
    pub fn total(&self) -> f64 {
        self.immediate + self.deferred + self.retry + self.fraud
    }
}

impl From<RawOutcomeWeights> for OutcomeWeights {
    /// Normalize clamped weights into a distribution.
    ///
    /// Callers guarantee a positive total (immediate starts at 65 and deferred
    /// never drops below 20).
    fn from(raw: RawOutcomeWeights) -> Self {
        let total = raw.total() as f64;
        Self {
            immediate: raw.immediate as f64 / total,
            deferred: raw.deferred as f64 / total,
            retry: raw.retry as f64 / total,
            fraud: raw.fraud as f64 / total,
        }
    }
}

/// Per-attempt outcome once deferred mass has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveAttempt {
    pub success: f64,
    pub retry: f64,
    pub fraud: f64,
}

impl EffectiveAttempt {
    pub fn total(&self) -> f64 {
        self.success + self.retry + self.fraud
    }
}

/// How one phase ends after its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    pub success: f64,
    pub fraud: f64,
    pub retry_exhausted: f64,
}

impl PhaseOutcome {
    /// Nothing attempted yet: all mass is still waiting on a retry.
    pub const UNATTEMPTED: PhaseOutcome = PhaseOutcome {
        success: 0.0,
        fraud: 0.0,
        retry_exhausted: 1.0,
    };

    pub fn total(&self) -> f64 {
        self.success + self.fraud + self.retry_exhausted
    }
}

/// Terminal outcome of the full create → confirm workflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndToEndOutcome {
    pub success: f64,
    pub create_fraud: f64,
    pub confirm_fraud: f64,
    pub create_retry_exhaust: f64,
    pub confirm_retry_exhaust: f64,
}

impl EndToEndOutcome {
    pub fn total(&self) -> f64 {
        self.success
            + self.create_fraud
            + self.confirm_fraud
            + self.create_retry_exhaust
            + self.confirm_retry_exhaust
    }
}

/// Which step of the workflow is being retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// `checkout.create()`; weights depend on the amount and shift per attempt.
    Create { amount: f64 },
    /// `checkout.confirm()`; fixed weights on every attempt.
    Confirm,
}

/// A full report run's configuration.
///
/// This is derived from CLI flags, the environment, and defaults.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub price_points: Vec<f64>,
    pub degradation_amounts: Vec<f64>,
    pub degradation_attempts: u32,
    pub max_attempts: u32,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            price_points: DEFAULT_PRICE_POINTS.to_vec(),
            degradation_amounts: DEFAULT_DEGRADATION_AMOUNTS.to_vec(),
            degradation_attempts: DEFAULT_DEGRADATION_ATTEMPTS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            export_json: None,
            export_csv: None,
        }
    }
}

/// Everything computed for one report amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRow {
    pub amount: f64,
    /// Create weights on the first attempt.
    pub create_weights: OutcomeWeights,
    /// Effective create attempt on the first attempt.
    pub create_effective: EffectiveAttempt,
    pub create_outcome: PhaseOutcome,
    pub end_to_end: EndToEndOutcome,
}

/// Confirm-phase figures (identical for every amount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmRow {
    pub weights: OutcomeWeights,
    pub effective: EffectiveAttempt,
    pub outcome: PhaseOutcome,
}

/// A saved report file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub max_attempts: u32,
    pub confirm: ConfirmRow,
    pub rows: Vec<AmountRow>,
}
