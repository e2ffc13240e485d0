use super::mock::MockEvidenceStore;
use super::*;

#[tokio::test]
async fn test_mock_returns_passages_in_order() {
    let store = MockEvidenceStore::with_passages(vec![
        Passage::new("first passage", 0.9),
        Passage::new("second passage", 0.7),
    ]);

    let passages = store.retrieve("anything", 5).await.unwrap();

    assert_eq!(passages.len(), 2);
    assert_eq!(passages[0].text, "first passage");
    assert_eq!(passages[1].text, "second passage");
}

#[tokio::test]
async fn test_mock_respects_limit() {
    let store = MockEvidenceStore::with_passages(vec![
        Passage::new("a", 0.9),
        Passage::new("b", 0.8),
        Passage::new("c", 0.7),
    ]);

    let passages = store.retrieve("q", 2).await.unwrap();
    assert_eq!(passages.len(), 2);
}

#[tokio::test]
async fn test_mock_empty_store_yields_empty_result() {
    let store = MockEvidenceStore::new();
    let passages = store.retrieve("q", 5).await.unwrap();
    assert!(passages.is_empty());
}

#[tokio::test]
async fn test_mock_injected_failure() {
    let store = MockEvidenceStore::new();
    store.fail_next();

    assert!(matches!(
        store.retrieve("q", 5).await,
        Err(EvidenceError::SearchFailed { .. })
    ));

    // Failure is one-shot.
    assert!(store.retrieve("q", 5).await.is_ok());
}

#[test]
fn test_passage_serde_roundtrip() {
    let passage = Passage::new("evidence text", 0.42);
    let json = serde_json::to_string(&passage).unwrap();
    let back: Passage = serde_json::from_str(&json).unwrap();
    assert_eq!(back, passage);
}
