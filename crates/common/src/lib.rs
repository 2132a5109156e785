//! Shared types and error definitions used across all chatbridge crates.

pub mod error;
pub mod types;

pub use error::{Error, Result};
