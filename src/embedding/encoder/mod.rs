//! CTI-BERT sentence encoder.
//!
//! Maps text to a unit-length `Vec<f32>`. Use [`EncoderConfig::stub`] for
//! tests/examples without model files.

/// Encoder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer_with_truncation;

enum EncoderBackend {
    Model {
        model: Arc<Mutex<BertEncoder>>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding oracle for queries and catalog descriptions (supports stub mode).
pub struct CtiEmbedder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for CtiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtiEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl CtiEmbedder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        if !config.model_available() || !config.tokenizer_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_path.clone(),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for encoder");

        let model = BertEncoder::load(&config.model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        if config.embedding_dim > model.hidden_size() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        let tokenizer = load_tokenizer_with_truncation(&config.model_path, config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            model_path = %config.model_path.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            hidden_size = model.hidden_size(),
            "Encoder model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Arc::new(Mutex::new(model)),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Generates a unit-length embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer.as_ref(), device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Generates embeddings for a batch of strings.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // Sequential for now; proper batching would need padding.
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &Arc<Mutex<BertEncoder>>,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = Tensor::new(tokens, device)
            .map_err(EmbeddingError::from)?
            .unsqueeze(0)
            .map_err(EmbeddingError::from)?;

        let type_ids = Tensor::new(encoding.get_type_ids(), device)
            .map_err(EmbeddingError::from)?
            .unsqueeze(0)
            .map_err(EmbeddingError::from)?;

        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)
            .map_err(EmbeddingError::from)?
            .unsqueeze(0)
            .map_err(EmbeddingError::from)?;

        let pooled = model
            .lock()
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let mut embedding = pooled
            .squeeze(0)
            .map_err(EmbeddingError::from)?
            .to_vec1::<f32>()
            .map_err(EmbeddingError::from)?;

        embedding.truncate(self.config.embedding_dim);

        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(embedding)
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
