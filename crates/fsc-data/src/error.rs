//! Error types for dataset loading and lookup.

use thiserror::Error;

/// Result type alias for dataset operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while loading or looking up datasets.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset file: {0}")]
    Read(String),

    #[error("failed to parse dataset: {0}")]
    Parse(String),

    #[error("invalid dataset: {0}")]
    Invalid(String),

    #[error("unknown dataset: {0}")]
    Unknown(String),
}
