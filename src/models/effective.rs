//! Effective single-attempt probabilities (SDK call + webhook resolution).

use crate::domain::{EffectiveAttempt, OutcomeWeights};
use crate::models::deferred::DEFERRED;

/// Route every unit of raw weight to success, retry, or fraud.
///
/// Immediate mass is success outright; deferred mass is split by the deferred
/// resolver. A distribution with no deferred mass is valid and routes nothing
/// through the resolver.
pub fn effective_attempt(weights: &OutcomeWeights) -> EffectiveAttempt {
    EffectiveAttempt {
        success: weights.immediate + weights.deferred * DEFERRED.success,
        retry: weights.retry + weights.deferred * DEFERRED.retry,
        fraud: weights.fraud + weights.deferred * DEFERRED.fraud,
    }
}
