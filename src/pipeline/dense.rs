//! Variant A: dense similarity matching against the catalog.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::EmbeddedCatalog;
use crate::constants::validate_embedding_dim;
use crate::embedding::CtiEmbedder;
use crate::scoring::{score_catalog, select_top_k};

use super::error::PipelineError;
use super::response::DenseResponse;

/// Embed → score-all → select-top-k-threshold → assemble.
///
/// Pure function of the query given the loaded embedder and catalog; safe
/// to call from parallel tasks as long as the embedder backend is (the
/// candle model sits behind a mutex).
pub struct DensePipeline {
    embedder: Arc<CtiEmbedder>,
    catalog: Arc<EmbeddedCatalog>,
    top_k: usize,
    threshold: f32,
}

impl std::fmt::Debug for DensePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DensePipeline")
            .field("catalog_entries", &self.catalog.len())
            .field("top_k", &self.top_k)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl DensePipeline {
    /// Wires the pipeline, checking that the embedder and catalog agree on
    /// dimensionality.
    pub fn new(
        embedder: Arc<CtiEmbedder>,
        catalog: Arc<EmbeddedCatalog>,
        top_k: usize,
        threshold: f32,
    ) -> Result<Self, PipelineError> {
        validate_embedding_dim(catalog.dim(), embedder.embedding_dim()).map_err(|e| {
            PipelineError::Configuration {
                reason: e.to_string(),
            }
        })?;

        info!(
            catalog_entries = catalog.len(),
            top_k, threshold, "Dense pipeline ready"
        );

        Ok(Self {
            embedder,
            catalog,
            top_k,
            threshold,
        })
    }

    /// Classifies one query. Empty input is valid (and likely a no-match).
    pub fn analyze(&self, query: &str) -> Result<DenseResponse, PipelineError> {
        let vector = self.embedder.embed(query)?;
        let scores = score_catalog(&vector, &self.catalog)?;
        let selected = select_top_k(&scores, self.top_k, self.threshold);

        debug!(
            query_len = query.len(),
            scored = scores.len(),
            selected = selected.len(),
            "Dense analysis complete"
        );

        Ok(DenseResponse::assemble(self.catalog.catalog(), &selected))
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &EmbeddedCatalog {
        &self.catalog
    }
}
