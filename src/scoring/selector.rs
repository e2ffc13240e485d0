//! Top-K selection with a confidence threshold.

use std::cmp::Ordering;

use super::types::ScoredCandidate;

/// Selects up to `k` highest-scoring entries at or above `threshold`,
/// descending by score.
///
/// Ties break by catalog insertion order (first-seen entry wins); the sort
/// is stable, so equal scores keep their index order. The threshold is
/// inclusive: a score exactly equal to it is kept. All comparisons use the
/// raw score; rounding is presentation-only and happens downstream.
pub fn select_top_k(scores: &[f32], k: usize, threshold: f32) -> Vec<ScoredCandidate> {
    let mut candidates: Vec<ScoredCandidate> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| ScoredCandidate::new(index, score))
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    candidates
        .into_iter()
        .take(k)
        .filter(|c| c.score >= threshold)
        .collect()
}
