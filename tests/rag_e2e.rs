//! End-to-end retrieve-rerank-generate tests with the mock evidence store,
//! stub classifier, and stub generator.

use std::sync::Arc;

use techlens::catalog::{Catalog, LabelMap, TechniqueEntry};
use techlens::embedding::{ClassifierConfig, CtiClassifier};
use techlens::generation::ExplanationGenerator;
use techlens::pipeline::RagPipeline;
use techlens::retrieval::{MockEvidenceStore, Passage};

fn entry(id: &str, name: &str, description: &str) -> TechniqueEntry {
    TechniqueEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn two_label_pipeline(store: MockEvidenceStore) -> RagPipeline<MockEvidenceStore> {
    let classifier =
        Arc::new(CtiClassifier::load(ClassifierConfig::stub().with_label_count(2)).unwrap());
    let catalog = Arc::new(
        Catalog::from_entries(vec![
            entry("T1003", "OS Credential Dumping", "credential theft from memory"),
            entry(
                "T1059",
                "Command and Scripting Interpreter",
                "abuse of command and script interpreters",
            ),
        ])
        .unwrap(),
    );
    let label_map =
        LabelMap::from_ids(vec!["T1003".to_string(), "T1059".to_string()]).unwrap();
    let generator = ExplanationGenerator::stub().unwrap();

    RagPipeline::new(store, classifier, catalog, label_map, generator, 5).unwrap()
}

#[tokio::test]
async fn test_full_rag_flow_produces_mapped_technique() {
    let query = "The actor ran PowerShell commands across compromised hosts";
    let store = MockEvidenceStore::with_passages(vec![
        Passage::new("routine patch management activity", 0.8),
        Passage::new("actor ran powershell commands across compromised hosts", 0.6),
    ]);
    let pipeline = two_label_pipeline(store);

    let response = pipeline.analyze(query).await.unwrap();

    let technique = response.technique.as_ref().unwrap();
    assert_eq!(technique.id, "T1059");
    assert_eq!(technique.name, "Command and Scripting Interpreter");

    let confidence = response.confidence.unwrap();
    assert!((0.0..=1.0).contains(&confidence));

    // Evidence preserves retrieval order and includes every passage, not
    // only the winner.
    assert_eq!(response.evidence.len(), 2);
    assert_eq!(response.evidence[0], "routine patch management activity");

    // The prompt carries the query and the winning passage; the stub
    // generator echoes it back.
    assert!(response.explanation.contains(query));
    assert!(
        response
            .explanation
            .contains("actor ran powershell commands across compromised hosts")
    );
    assert!(response.explanation.contains("T1059"));
}

#[tokio::test]
async fn test_rag_response_json_contract() {
    let store = MockEvidenceStore::with_passages(vec![Passage::new(
        "mimikatz was used to read lsass memory",
        0.9,
    )]);
    let pipeline = two_label_pipeline(store);

    let response = pipeline
        .analyze("mimikatz was used to read lsass memory")
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert!(json["technique"]["id"].is_string());
    assert!(json["technique"]["name"].is_string());
    assert!(json["confidence"].is_number());
    assert!(json["evidence"].is_array());
    assert!(json["explanation"].is_string());
}

#[tokio::test]
async fn test_empty_retrieval_is_success_with_empty_fields() {
    let pipeline = two_label_pipeline(MockEvidenceStore::new());

    let response = pipeline.analyze("a narrative nothing was indexed for").await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert!(response.is_empty_evidence());
    assert!(json["technique"].is_null());
    assert!(json["confidence"].is_null());
    assert_eq!(json["evidence"], serde_json::json!([]));
    assert_eq!(json["explanation"], "");
}

#[tokio::test]
async fn test_retrieval_limit_caps_reranked_passages() {
    let store = MockEvidenceStore::with_passages(vec![
        Passage::new("passage one", 0.9),
        Passage::new("passage two", 0.8),
        Passage::new("passage three", 0.7),
    ]);
    let classifier = Arc::new(CtiClassifier::stub().unwrap());
    let catalog = Arc::new(
        Catalog::from_entries(vec![entry("T1059", "Command and Scripting Interpreter", "x")])
            .unwrap(),
    );
    let label_map = LabelMap::from_ids(vec!["T1059".to_string()]).unwrap();
    let pipeline = RagPipeline::new(
        store,
        classifier,
        catalog,
        label_map,
        ExplanationGenerator::stub().unwrap(),
        2,
    )
    .unwrap();

    let response = pipeline.analyze("passage").await.unwrap();

    assert_eq!(response.evidence.len(), 2);
    assert_eq!(response.evidence, vec!["passage one", "passage two"]);
}
