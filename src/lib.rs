//! Techlens library crate (used by the CLI binary and integration tests).
//!
//! Classifies free-text threat-intelligence narratives against a fixed
//! ATT&CK-style technique taxonomy. Two pipeline variants share one
//! decision core:
//!
//! - **Dense** ([`DensePipeline`]): embed the query, cosine-score it
//!   against precomputed catalog embeddings, select top-K above a
//!   threshold.
//! - **RAG** ([`RagPipeline`]): retrieve evidence passages, rerank each
//!   (query, passage) pair with a classifier, pick the best-supported
//!   passage, and synthesize an explanation.
//!
//! # Module Map
//!
//! - [`catalog`] - Technique taxonomy loading and startup embedding
//! - [`embedding`] - candle-backed encoder and classifier oracles
//! - [`retrieval`] - Qdrant evidence index behind the [`EvidenceStore`] trait
//! - [`scoring`] - The pure numeric decision core (similarity, selection,
//!   softmax, best-passage)
//! - [`generation`] - Prompt construction and the genai explanation backend
//! - [`pipeline`] - Variant wiring and response assembly
//! - [`config`] - `TECHLENS_*` environment configuration
//!
//! # Test/Mock Support
//!
//! Every oracle has a deterministic stub (`EncoderConfig::stub`,
//! `ClassifierConfig::stub`, `GenerationConfig::stub`) and the retrieval
//! stage has [`MockEvidenceStore`] behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod generation;
pub mod pipeline;
pub mod retrieval;
pub mod scoring;

pub use catalog::{Catalog, CatalogError, EmbeddedCatalog, LabelMap, TechniqueEntry};
pub use config::{Config, ConfigError, PipelineVariant};
pub use constants::{
    CONFIDENCE_PRECISION, DEFAULT_EMBEDDING_DIM, DEFAULT_RETRIEVAL_LIMIT,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, DimMismatch, round_confidence,
    validate_embedding_dim,
};
pub use embedding::{
    ClassifierConfig, ClassifierError, CtiClassifier, CtiEmbedder, EmbeddingError, EncoderConfig,
};
pub use generation::{ExplanationGenerator, GenerationConfig, GenerationError, build_prompt};
pub use pipeline::{
    DensePipeline, DenseResponse, MatchResult, MatchStatus, PipelineError, RagPipeline,
    RagResponse, TechniqueRef,
};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockEvidenceStore;
pub use retrieval::{EvidenceError, EvidenceStore, Passage, QdrantEvidenceIndex};
pub use scoring::{
    BestPassage, ScoredCandidate, ScoringError, passage_confidence, score_catalog, select_best,
    select_top_k, softmax,
};
