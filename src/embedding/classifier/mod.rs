//! CTI-BERT sequence classifier.
//!
//! Scores a (query, passage) pair and returns raw logits over a fixed label
//! space. Logits are an arbitrary scale; normalization to probabilities
//! happens in [`crate::scoring::softmax`], never here.

pub mod config;
pub mod error;


pub use config::{CLASSIFIER_MAX_SEQ_LEN, ClassifierConfig, DEFAULT_LABEL_COUNT};
pub use error::ClassifierError;

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::bert::BertSeqClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer_with_truncation;

pub struct CtiClassifier {
    device: candle_core::Device,
    config: ClassifierConfig,
    model_loaded: bool,
    model: Option<BertSeqClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for CtiClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtiClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model_loaded)
            .finish()
    }
}

impl CtiClassifier {
    pub fn load(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        if let Err(msg) = config.validate() {
            return Err(ClassifierError::InvalidConfig { reason: msg });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for classifier");

        if let Some(ref model_path) = config.model_path {
            if !model_path.exists() {
                return Err(ClassifierError::ModelNotFound {
                    path: model_path.clone(),
                });
            }

            let config_path = model_path.join("config.json");
            if !config_path.exists() {
                return Err(ClassifierError::ModelLoadFailed {
                    reason: format!("Missing config.json in {}", model_path.display()),
                });
            }

            let weights_path = model_path.join("model.safetensors");
            if !weights_path.exists() {
                return Err(ClassifierError::ModelLoadFailed {
                    reason: format!("Missing model.safetensors in {}", model_path.display()),
                });
            }

            info!(
                model_path = %model_path.display(),
                label_count = config.label_count,
                "Loading classifier model"
            );

            let model = BertSeqClassifier::load(model_path, &device, config.label_count)
                .map_err(|e| ClassifierError::ModelLoadFailed {
                    reason: format!("Failed to load BERT classifier: {}", e),
                })?;

            let tokenizer = load_tokenizer_with_truncation(model_path, CLASSIFIER_MAX_SEQ_LEN)
                .map_err(|e| ClassifierError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                })?;

            info!("Classifier model loaded");

            Ok(Self {
                device,
                config,
                model_loaded: true,
                model: Some(model),
                tokenizer: Some(tokenizer),
            })
        } else {
            info!("No classifier model path configured, operating in stub mode");
            Ok(Self {
                device,
                config,
                model_loaded: false,
                model: None,
                tokenizer: None,
            })
        }
    }

    pub fn stub() -> Result<Self, ClassifierError> {
        Self::load(ClassifierConfig::stub())
    }

    /// Raw logits over the label space for one (query, passage) pair.
    pub fn score_pair(&self, query: &str, passage: &str) -> Result<Vec<f32>, ClassifierError> {
        debug!(
            query_len = query.len(),
            passage_len = passage.len(),
            model_loaded = self.model_loaded,
            "Scoring query-passage pair"
        );

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            let tokens = tokenizer.encode((query, passage), true).map_err(|e| {
                ClassifierError::TokenizationFailed {
                    reason: e.to_string(),
                }
            })?;

            let token_ids = Tensor::new(tokens.get_ids(), &self.device)
                .map_err(ClassifierError::from)?
                .unsqueeze(0)
                .map_err(ClassifierError::from)?;

            let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)
                .map_err(ClassifierError::from)?
                .unsqueeze(0)
                .map_err(ClassifierError::from)?;

            let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)
                .map_err(ClassifierError::from)?
                .unsqueeze(0)
                .map_err(ClassifierError::from)?;

            let logits = model
                .forward(&token_ids, &type_ids, Some(&attention_mask))
                .map_err(|e| ClassifierError::InferenceFailed {
                    reason: e.to_string(),
                })?;

            return logits
                .flatten_all()
                .map_err(ClassifierError::from)?
                .to_vec1::<f32>()
                .map_err(ClassifierError::from);
        }

        let logits = self.compute_placeholder_logits(query, passage);

        debug!(?logits, "Computed logits (stub)");

        Ok(logits)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn label_count(&self) -> usize {
        self.config.label_count
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Stub logits: the last label receives a token-overlap score, the rest
    /// zero. Higher lexical overlap between query and passage thus yields a
    /// higher max-class probability after softmax, which is enough for the
    /// selection logic to be exercised realistically in tests.
    fn compute_placeholder_logits(&self, query: &str, passage: &str) -> Vec<f32> {
        use std::collections::HashSet;

        let stop_words: HashSet<&str> = [
            "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has",
            "had", "do", "does", "did", "will", "would", "to", "of", "in", "on", "for", "with",
            "and", "or", "not",
        ]
        .into_iter()
        .collect();

        let terms = |text: &str| -> HashSet<String> {
            text.to_lowercase()
                .split_whitespace()
                .filter(|w| !stop_words.contains(w))
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
                .filter(|w| !w.is_empty())
                .collect()
        };

        let query_terms = terms(query);
        let passage_terms = terms(passage);

        let overlap = if query_terms.is_empty() || passage_terms.is_empty() {
            0.0
        } else {
            let shared = query_terms.intersection(&passage_terms).count() as f32;
            shared / query_terms.len().max(passage_terms.len()) as f32
        };

        let mut logits = vec![0.0; self.config.label_count];
        if let Some(last) = logits.last_mut() {
            *last = overlap * 4.0;
        }

        logits
    }
}
