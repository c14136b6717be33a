//! Error types for the verification driver.

use thiserror::Error;

/// Top-level error type for verification runs.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Invalid run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error on input, output or the histogram dump.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Histogram dump serialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for verification runs.
pub type Result<T> = std::result::Result<T, VerifyError>;
