//! Resolution of deferred (webhook) outcomes.
//!
//! The SDK resolves a deferred call with two sequential independent checks:
//! an 80/20 success/not-success split, then a 95/5 retry/fraud split inside the
//! not-success branch. We keep the closed form of those two checks.

use serde::{Deserialize, Serialize};

/// Probability the first check resolves a deferred call as success.
const PRIMARY_SUCCESS: f64 = 0.80;
const PRIMARY_NOT_SUCCESS: f64 = 0.20;
/// Probability a non-success deferred call is asked to retry (else fraud).
const SECONDARY_RETRY: f64 = 0.95;
const SECONDARY_FRAUD: f64 = 0.05;

/// 3-way distribution of how one unit of deferred mass resolves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeferredResolver {
    pub success: f64,
    pub retry: f64,
    pub fraud: f64,
}

/// `success = 0.80`, `retry = 0.20 × 0.95`, `fraud = 0.20 × 0.05`.
pub const DEFERRED: DeferredResolver = DeferredResolver {
    success: PRIMARY_SUCCESS,
    retry: PRIMARY_NOT_SUCCESS * SECONDARY_RETRY,
    fraud: PRIMARY_NOT_SUCCESS * SECONDARY_FRAUD,
};

impl DeferredResolver {
    pub fn sum(&self) -> f64 {
        self.success + self.retry + self.fraud
    }
}
