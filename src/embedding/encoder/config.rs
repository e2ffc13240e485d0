use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default encoder embedding dimension (CTI-BERT hidden size).
pub const ENCODER_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default encoder max sequence length.
pub const ENCODER_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`CtiEmbedder`](super::CtiEmbedder).
pub struct EncoderConfig {
    /// Path to the HF model directory (`config.json` + `model.safetensors`).
    pub model_path: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokenizer_path: PathBuf::new(),
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            embedding_dim: ENCODER_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    /// Creates a config for a model directory, inferring `tokenizer.json`
    /// from it.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        let model_path = model_path.into();
        let tokenizer_path = model_path.join("tokenizer.json");

        Self {
            model_path,
            tokenizer_path,
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_path.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `true` if the model directory exists.
    pub fn model_available(&self) -> bool {
        !self.model_path.as_os_str().is_empty() && self.model_path.exists()
    }

    /// Returns `true` if the tokenizer path exists.
    pub fn tokenizer_available(&self) -> bool {
        !self.tokenizer_path.as_os_str().is_empty() && self.tokenizer_path.exists()
    }
}
