use std::sync::RwLock;

use super::error::EvidenceError;
use super::{EvidenceStore, Passage};

/// In-memory evidence store returning canned passages.
#[derive(Default)]
pub struct MockEvidenceStore {
    passages: RwLock<Vec<Passage>>,
    fail_next: RwLock<bool>,
}

impl MockEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store with fixed passages, most relevant first.
    pub fn with_passages(passages: Vec<Passage>) -> Self {
        Self {
            passages: RwLock::new(passages),
            fail_next: RwLock::new(false),
        }
    }

    /// Makes the next `retrieve` call fail, for error-path tests.
    pub fn fail_next(&self) {
        *self.fail_next.write().unwrap() = true;
    }
}

impl EvidenceStore for MockEvidenceStore {
    async fn retrieve(&self, _query: &str, limit: usize) -> Result<Vec<Passage>, EvidenceError> {
        if std::mem::take(&mut *self.fail_next.write().unwrap()) {
            return Err(EvidenceError::SearchFailed {
                collection: "mock".to_string(),
                message: "injected failure".to_string(),
            });
        }

        let passages = self.passages.read().unwrap();
        Ok(passages.iter().take(limit).cloned().collect())
    }
}
