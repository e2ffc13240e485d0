use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load classifier model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("classifier inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid classifier configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for ClassifierError {
    fn from(err: candle_core::Error) -> Self {
        ClassifierError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
