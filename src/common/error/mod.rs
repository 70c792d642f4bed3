//! Error types for document comparison.
//!
//! Every failure the comparison core can raise is one [`Error`] variant that
//! carries the path (or tool) involved and the underlying cause, so callers
//! can report it without re-deriving context.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
