//! Logit normalization and best-passage selection.

use super::types::BestPassage;

/// Numerically stable softmax.
///
/// Subtracting the max before exponentiation keeps large logits from
/// overflowing; the result is invariant under that shift. Raw classifier
/// scores are on an arbitrary scale and must pass through here before
/// being treated as probabilities. Empty input yields an empty output.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return vec![];
    }

    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

/// Max class probability and its label index for one passage's logits.
///
/// Ties break toward the lowest label index. Empty logits yield `None`.
pub fn passage_confidence(logits: &[f32]) -> Option<(f32, usize)> {
    let probs = softmax(logits);

    let mut best: Option<(f32, usize)> = None;
    for (label, &prob) in probs.iter().enumerate() {
        match best {
            Some((best_prob, _)) if prob <= best_prob => {}
            _ => best = Some((prob, label)),
        }
    }

    best
}

/// Picks the passage with the single highest confidence.
///
/// Selection uses full float precision, never a rounded display value.
/// The first passage (retrieval order) achieving the maximum wins ties.
/// No passages means no best passage, which downstream stages must turn
/// into an explicit empty-evidence result rather than an error.
pub fn select_best(per_passage: &[(f32, usize)]) -> Option<BestPassage> {
    let mut best: Option<BestPassage> = None;

    for (index, &(confidence, label)) in per_passage.iter().enumerate() {
        match best {
            Some(b) if confidence <= b.confidence => {}
            _ => {
                best = Some(BestPassage {
                    index,
                    confidence,
                    label,
                });
            }
        }
    }

    best
}
