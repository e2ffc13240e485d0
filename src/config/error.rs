//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// All of these are fatal at startup: the process must not serve a query
/// with a half-validated configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {var}='{value}': {reason}")]
    ParseError {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Threshold outside [0, 1].
    #[error("invalid threshold '{value}': must be between 0.0 and 1.0")]
    InvalidThreshold { value: f32 },

    /// `top_k` or `retrieval_limit` of zero would make every query a no-match.
    #[error("invalid {name}: must be at least 1")]
    ZeroLimit { name: &'static str },

    /// Unknown pipeline variant name.
    #[error("unknown pipeline variant '{value}' (expected 'dense' or 'rag')")]
    UnknownVariant { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
