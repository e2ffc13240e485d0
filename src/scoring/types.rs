/// A catalog entry paired with its raw (unrounded) similarity score.
///
/// Created during scoring, consumed by response assembly, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Catalog position of the entry.
    pub index: usize,
    /// Raw cosine similarity; rounding happens only at presentation.
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(index: usize, score: f32) -> Self {
        Self { index, score }
    }
}

/// The passage the reranker judged best-supported, with its confidence and
/// winning label index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPassage {
    /// Position in the retrieval result (retrieval order).
    pub index: usize,
    /// Max class probability for that passage, full float precision.
    pub confidence: f32,
    /// Argmax label index within the passage's distribution.
    pub label: usize,
}
