//! Multi-attempt phase outcomes and their end-to-end composition.
//!
//! - `aggregate`: bounded retry aggregation per phase
//! - `compose`: create → confirm composition

pub mod aggregate;
pub mod compose;

pub use aggregate::*;
pub use compose::*;
