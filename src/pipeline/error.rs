use thiserror::Error;

use crate::embedding::{ClassifierError, EmbeddingError};
use crate::generation::GenerationError;
use crate::retrieval::EvidenceError;
use crate::scoring::ScoringError;

/// Request-level pipeline errors.
///
/// Any oracle failure is fatal to the request it occurred in and surfaces
/// here; it is never downgraded to a no-match (a failed classification is
/// not the same as "no confident match"). Shared catalog/oracle state is
/// untouched by a failed request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Pipeline wiring inconsistency detected at construction time.
    #[error("invalid pipeline configuration: {reason}")]
    Configuration { reason: String },

    #[error("embedding oracle failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("evidence retrieval failed: {0}")]
    Retrieval(#[from] EvidenceError),

    #[error("classifier oracle failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("explanation generation failed: {0}")]
    Generation(#[from] GenerationError),
}
