//! Numeric foundation shared across the crate.

mod clamp;
mod common;

// Re-export
pub use clamp::*;
pub use common::*;
