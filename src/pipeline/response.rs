//! Response shapes and assembly.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constants::round_confidence;
use crate::retrieval::Passage;
use crate::scoring::ScoredCandidate;

/// Outcome status of a dense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one technique cleared the threshold.
    Ok,
    /// No technique cleared the threshold. A normal outcome, not an error.
    NoMatch,
}

/// One matched technique in a dense response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub name: String,
    /// Similarity score rounded for presentation; always in [0, 1] up to
    /// float error on near-parallel vectors.
    pub confidence: f32,
    pub description: String,
}

/// Dense (Variant A) pipeline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseResponse {
    pub status: MatchStatus,
    pub techniques: Vec<MatchResult>,
}

impl DenseResponse {
    /// Assembles the response from selected candidates (already ordered).
    ///
    /// Rounding to display precision happens here and nowhere earlier, so
    /// it can never influence the ordering decision.
    pub fn assemble(catalog: &Catalog, selected: &[ScoredCandidate]) -> Self {
        let techniques: Vec<MatchResult> = selected
            .iter()
            .filter_map(|candidate| {
                let entry = catalog.get(candidate.index)?;
                Some(MatchResult {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    confidence: round_confidence(candidate.score),
                    description: entry.description.clone(),
                })
            })
            .collect();

        let status = if techniques.is_empty() {
            MatchStatus::NoMatch
        } else {
            MatchStatus::Ok
        };

        Self { status, techniques }
    }

    pub fn is_no_match(&self) -> bool {
        self.status == MatchStatus::NoMatch
    }
}

/// Technique reference in a RAG response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueRef {
    pub id: String,
    pub name: String,
}

/// RAG (Variant B) pipeline response.
///
/// With zero retrieved passages this degrades to the explicit
/// empty-evidence shape: null technique and confidence, empty evidence,
/// empty explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    pub technique: Option<TechniqueRef>,
    pub confidence: Option<f32>,
    pub evidence: Vec<String>,
    pub explanation: String,
}

impl RagResponse {
    /// The well-formed result for a query that retrieved no evidence.
    pub fn empty_evidence() -> Self {
        Self {
            technique: None,
            confidence: None,
            evidence: vec![],
            explanation: String::new(),
        }
    }

    /// Assembles a matched response.
    pub fn assemble(
        technique: TechniqueRef,
        confidence: f32,
        passages: &[Passage],
        explanation: String,
    ) -> Self {
        Self {
            technique: Some(technique),
            confidence: Some(round_confidence(confidence)),
            evidence: passages.iter().map(|p| p.text.clone()).collect(),
            explanation,
        }
    }

    pub fn is_empty_evidence(&self) -> bool {
        self.technique.is_none()
    }
}
