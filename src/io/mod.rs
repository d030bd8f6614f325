//! Input/output helpers.
//!
//! - report exports (JSON/CSV) and JSON read-back (`export`)

pub mod export;

pub use export::*;
