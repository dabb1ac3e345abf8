//! Vox Common Library
//!
//! Shared wire types for the vox platform API, used by both the harness
//! and the in-process stub backend.

pub mod types;

pub use types::*;

/// Vox harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
