use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the evidence retrieval stage.
pub enum EvidenceError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed { collection: String, message: String },

    /// Search failed.
    #[error("failed to search in '{collection}': {message}")]
    SearchFailed { collection: String, message: String },

    /// Indexing passages failed.
    #[error("failed to index passages into '{collection}': {message}")]
    IndexFailed { collection: String, message: String },

    /// Embedding the query or a passage failed.
    #[error("evidence embedding failed: {0}")]
    EmbeddingFailed(#[from] crate::embedding::EmbeddingError),
}
