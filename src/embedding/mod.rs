//! Model oracles built on candle.
//!
//! - [`encoder`] provides dense embedding generation.
//! - [`classifier`] provides (query, passage) logit scoring used by
//!   [`crate::scoring`].

/// BERT model wrappers shared by encoder and classifier.
pub mod bert;
/// Classifier oracle (RAG reranking).
pub mod classifier;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Dense embedding oracle.
pub mod encoder;
/// Tokenizer loading helpers.
pub mod utils;

pub use classifier::{ClassifierConfig, ClassifierError, CtiClassifier, DEFAULT_LABEL_COUNT};
pub use encoder::{CtiEmbedder, ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};
pub use error::EmbeddingError;
