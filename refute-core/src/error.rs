//! Error types for Refute property-based testing.

use thiserror::Error;

/// Main error type for Refute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An integer range whose lower bound exceeds its upper bound.
    #[error("invalid integer range: low bound {low} exceeds high bound {high}")]
    InvalidRange { low: i64, high: i64 },
}

/// Result type for Refute operations.
pub type Result<T> = std::result::Result<T, Error>;
