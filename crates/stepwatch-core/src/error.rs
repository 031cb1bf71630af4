//! Error types for benchmark regression detection
//!
//! Provides the unified error type shared by all stepwatch crates.

use thiserror::Error;

/// Core error type for regression detection
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid detector parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed input table or row
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a window size that is zero or even
    pub fn invalid_window(window_size: usize) -> Self {
        Self::InvalidParameter(format!(
            "window_size {window_size} must be a positive odd integer"
        ))
    }

    /// Create an error for a tolerance outside (0, 1]
    pub fn invalid_tolerance(tolerance: f64) -> Self {
        Self::InvalidParameter(format!("tolerance {tolerance} must be in (0, 1]"))
    }

    /// Create an error for a required value that is absent from a row
    pub fn missing_value(field: &str, row: usize) -> Self {
        Self::InvalidInput(format!("row {row}: required field '{field}' is null"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}
