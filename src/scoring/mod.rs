//! The ranking/decision core.
//!
//! Pure numeric functions shared by both pipeline variants: cosine scoring
//! against the catalog ([`similarity`]), top-K/threshold selection
//! ([`selector`]), and logit normalization plus best-passage selection
//! ([`rerank`]). Oracle calls live in [`crate::pipeline`]; nothing here
//! touches a model.
//!
//! Similarity scores (bounded dot products of unit vectors) and classifier
//! confidences (softmax probabilities) are different numeric spaces. The
//! similarity threshold applies only to the former.

pub mod error;
pub mod rerank;
pub mod selector;
pub mod similarity;
pub mod types;


pub use error::ScoringError;
pub use rerank::{passage_confidence, select_best, softmax};
pub use selector::select_top_k;
pub use similarity::score_catalog;
pub use types::{BestPassage, ScoredCandidate};
