//! Error types for the Shutter core.

use thiserror::Error;

/// All possible errors from the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    // State errors
    #[error("invalid tombstone data: {0}")]
    InvalidTombstoneData(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
