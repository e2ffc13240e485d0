//! Cross-cutting, shared constants.
//!
//! Thresholds are tied to the scoring space they were tuned for: the
//! similarity threshold applies to cosine scores of unit vectors, never to
//! softmax probabilities out of the classifier. Keep them separate.

/// Embedding dimension of the CTI-BERT encoder output.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Minimum cosine similarity for a catalog entry to count as a match.
/// Inclusive: a score exactly at the threshold is kept.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.55;

/// Number of catalog entries the dense selector may return.
pub const DEFAULT_TOP_K: usize = 3;

/// Decimal places used when rounding confidences for presentation.
/// Selection always uses the unrounded score.
pub const CONFIDENCE_PRECISION: u32 = 4;

/// Maximum evidence passages requested from the retrieval stage.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 5;

/// Number of classifier output labels.
pub const DEFAULT_LABEL_COUNT: usize = 2;

/// Token budget for the generated explanation.
pub const DEFAULT_MAX_EXPLANATION_TOKENS: u32 = 200;

/// Default max sequence length for the encoder tokenizer.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Rounds a confidence to [`CONFIDENCE_PRECISION`] decimal places.
pub fn round_confidence(score: f32) -> f32 {
    let factor = 10f32.powi(CONFIDENCE_PRECISION as i32);
    (score * factor).round() / factor
}

/// Validates that a query vector matches the expected embedding dimension.
///
/// A mismatch is a configuration problem (wrong model for the catalog) and
/// must surface to the caller, never be coerced.
pub fn validate_embedding_dim(expected: usize, actual: usize) -> Result<(), DimMismatch> {
    if expected != actual {
        return Err(DimMismatch { expected, actual });
    }
    Ok(())
}

/// Embedding dimension mismatch between a query vector and the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("embedding dimension mismatch: expected {expected}, got {actual}")]
pub struct DimMismatch {
    /// Dimension the catalog was embedded with.
    pub expected: usize,
    /// Dimension of the offending vector.
    pub actual: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_confidence_four_places() {
        assert_eq!(round_confidence(0.123456), 0.1235);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn test_validate_embedding_dim() {
        assert!(validate_embedding_dim(768, 768).is_ok());
        let err = validate_embedding_dim(768, 384).unwrap_err();
        assert_eq!(err.expected, 768);
        assert_eq!(err.actual, 384);
    }
}
