//! Structured error types for the ethomap ecosystem.

use thiserror::Error;

/// Unified error type for all ethomap operations.
#[derive(Debug, Error)]
pub enum EthomapError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input (bad arguments, out-of-range values, mismatched lengths)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the ethomap ecosystem.
pub type Result<T> = std::result::Result<T, EthomapError>;
