use thiserror::Error;

use crate::constants::DimMismatch;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// Query vector dimension does not match the catalog embeddings.
    /// This is a configuration problem, never coerced away.
    #[error(transparent)]
    DimensionMismatch(#[from] DimMismatch),
}
