//! Microfacet Distribution Models

mod trowbridge_reitz;

// Re-export
pub use trowbridge_reitz::*;
