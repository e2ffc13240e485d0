use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the technique catalog.
///
/// Every variant is fatal at startup; a bad catalog aborts initialization
/// before any query is served.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file was not valid JSON for the expected shape.
    #[error("failed to parse catalog file '{path}': {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Two entries shared the same technique id.
    #[error("duplicate technique id in catalog: {id}")]
    DuplicateId { id: String },

    /// A required field was empty. Descriptions must be non-empty for
    /// their embeddings to be meaningful.
    #[error("catalog entry {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    /// Label map file could not be read or parsed.
    #[error("failed to load label map '{path}': {reason}")]
    LabelMapLoadFailed { path: PathBuf, reason: String },

    /// Label map had no entries.
    #[error("label map is empty")]
    EmptyLabelMap,

    /// Label map referenced a technique id absent from the catalog.
    #[error("label map references unknown technique id: {id}")]
    UnknownTechnique { id: String },

    /// Embedding the catalog descriptions failed at startup.
    #[error("failed to embed catalog: {0}")]
    EmbeddingFailed(#[from] crate::embedding::EmbeddingError),

    /// Precomputed embedding count did not match the entry count.
    #[error("catalog has {entries} entries but {embeddings} embeddings")]
    EmbeddingCountMismatch { entries: usize, embeddings: usize },

    /// A precomputed embedding had the wrong dimension.
    #[error("embedding {index} has dimension {actual}, expected {expected}")]
    EmbeddingDimMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}
