//! Variant B: retrieve → rerank → generate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, LabelMap};
use crate::embedding::CtiClassifier;
use crate::generation::{ExplanationGenerator, build_prompt};
use crate::retrieval::EvidenceStore;
use crate::scoring::{passage_confidence, select_best};

use super::error::PipelineError;
use super::response::{RagResponse, TechniqueRef};

/// Retrieve candidate evidence, rerank each (query, passage) pair with the
/// classifier, pick the best-supported passage, and synthesize an
/// explanation.
///
/// Retrieval order is treated as relevance order but the reranker is
/// authoritative for the final selection.
pub struct RagPipeline<E: EvidenceStore> {
    retriever: E,
    classifier: Arc<CtiClassifier>,
    catalog: Arc<Catalog>,
    label_map: LabelMap,
    generator: ExplanationGenerator,
    retrieval_limit: usize,
}

impl<E: EvidenceStore> std::fmt::Debug for RagPipeline<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("catalog_entries", &self.catalog.len())
            .field("labels", &self.label_map.len())
            .field("retrieval_limit", &self.retrieval_limit)
            .finish()
    }
}

impl<E: EvidenceStore> RagPipeline<E> {
    /// Wires the pipeline, validating the label map against the catalog.
    pub fn new(
        retriever: E,
        classifier: Arc<CtiClassifier>,
        catalog: Arc<Catalog>,
        label_map: LabelMap,
        generator: ExplanationGenerator,
        retrieval_limit: usize,
    ) -> Result<Self, PipelineError> {
        label_map
            .validate_against(&catalog)
            .map_err(|e| PipelineError::Configuration {
                reason: e.to_string(),
            })?;

        if label_map.len() != classifier.label_count() {
            // Out-of-range labels fall back to the map's last id, which
            // preserves the single-id behavior of partial maps.
            warn!(
                map_labels = label_map.len(),
                classifier_labels = classifier.label_count(),
                "Label map does not cover the classifier label space"
            );
        }

        info!(
            catalog_entries = catalog.len(),
            labels = label_map.len(),
            retrieval_limit,
            "RAG pipeline ready"
        );

        Ok(Self {
            retriever,
            classifier,
            catalog,
            label_map,
            generator,
            retrieval_limit,
        })
    }

    /// Classifies one query. Empty retrieval degrades to the explicit
    /// empty-evidence response, never an error.
    pub async fn analyze(&self, query: &str) -> Result<RagResponse, PipelineError> {
        let passages = self.retriever.retrieve(query, self.retrieval_limit).await?;

        if passages.is_empty() {
            debug!(query_len = query.len(), "No evidence retrieved");
            return Ok(RagResponse::empty_evidence());
        }

        let mut per_passage = Vec::with_capacity(passages.len());
        for passage in &passages {
            let logits = self.classifier.score_pair(query, &passage.text)?;
            let scored = passage_confidence(&logits).ok_or_else(|| {
                PipelineError::Configuration {
                    reason: "classifier produced an empty logit vector".to_string(),
                }
            })?;
            per_passage.push(scored);
        }

        // Non-empty input guarantees a best passage.
        let Some(best) = select_best(&per_passage) else {
            return Ok(RagResponse::empty_evidence());
        };

        let technique_id = self.label_map.technique_for_label(best.label);
        let technique_name = self
            .catalog
            .find(technique_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| technique_id.to_string());

        debug!(
            best_passage = best.index,
            confidence = best.confidence,
            technique_id,
            "Best passage selected"
        );

        let prompt = build_prompt(query, &passages[best.index].text, technique_id);
        let explanation = self.generator.generate(&prompt).await?;

        Ok(RagResponse::assemble(
            TechniqueRef {
                id: technique_id.to_string(),
                name: technique_name,
            },
            best.confidence,
            &passages,
            explanation,
        ))
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
