//! Reporting utilities: percentage tables over the numeric model.

pub mod format;

pub use format::*;
