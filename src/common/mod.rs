//! Shared types used across the comparison modules.

pub mod error;

pub use error::{Error, Result};
