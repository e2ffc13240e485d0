//! Evidence passage retrieval.
//!
//! The retrieval stage is an external capability: given query text it
//! returns an ordered set of candidate evidence passages. Retrieval order
//! is treated as relevance order, but final selection belongs to the
//! reranker, not to this stage. Zero passages is a normal outcome.

pub mod error;
pub mod index;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::EvidenceError;
pub use index::QdrantEvidenceIndex;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEvidenceStore;

use serde::{Deserialize, Serialize};

/// Default name of the evidence collection in Qdrant.
pub const EVIDENCE_COLLECTION_NAME: &str = "techlens_evidence";

/// One retrieved evidence passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text.
    pub text: String,
    /// Retrieval-stage relevance score (not comparable to classifier
    /// confidences; informational only).
    pub score: f32,
}

impl Passage {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Minimal async interface the RAG pipeline needs from a retrieval backend.
pub trait EvidenceStore: Send + Sync {
    /// Returns up to `limit` passages relevant to `query`, most relevant
    /// first. An empty result is valid.
    fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Passage>, EvidenceError>> + Send;
}
