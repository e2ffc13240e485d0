//! Dense similarity scoring against the catalog.

use crate::catalog::EmbeddedCatalog;
use crate::constants::validate_embedding_dim;

use super::error::ScoringError;

/// Scores `query` against every catalog entry, one score per entry in
/// catalog order.
///
/// Both sides are unit-length by construction, so cosine similarity
/// reduces to a dot product. A dimensionality mismatch surfaces as an
/// error; it is a configuration fault (wrong encoder for the catalog),
/// never something to coerce.
pub fn score_catalog(query: &[f32], catalog: &EmbeddedCatalog) -> Result<Vec<f32>, ScoringError> {
    validate_embedding_dim(catalog.dim(), query.len())?;

    let scores = catalog
        .embeddings()
        .iter()
        .map(|entry| dot(query, entry))
        .collect();

    Ok(scores)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
