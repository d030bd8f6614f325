//! Per-attempt outcome models.
//!
//! Models are implemented as small, pure functions so that the retry aggregation
//! can stay generic:
//! - raw SDK weights (`weights`)
//! - deferred webhook resolution (`deferred`)
//! - their combination into an effective attempt (`effective`)

pub mod deferred;
pub mod effective;
pub mod weights;

pub use deferred::*;
pub use effective::*;
pub use weights::*;
