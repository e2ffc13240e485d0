//! End-to-end dense pipeline tests (stub encoder, real decision core).

use std::sync::Arc;

use techlens::catalog::{Catalog, EmbeddedCatalog, TechniqueEntry};
use techlens::embedding::{CtiEmbedder, EncoderConfig};
use techlens::pipeline::{DensePipeline, MatchStatus};

fn entry(id: &str, name: &str, description: &str) -> TechniqueEntry {
    TechniqueEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn pipeline_from_catalog_file(json: &str) -> DensePipeline {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, json).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let embedder = Arc::new(CtiEmbedder::load(EncoderConfig::stub()).unwrap());
    let embedded = Arc::new(EmbeddedCatalog::embed(catalog, &embedder).unwrap());

    DensePipeline::new(embedder, embedded, 3, 0.55).unwrap()
}

#[test]
fn test_catalog_file_to_response_roundtrip() {
    let description = "Adversaries may attempt to dump credentials from LSASS memory";
    let json = format!(
        r#"[{{"id":"T1003","name":"Credential Dumping","description":"{description}"}}]"#
    );
    let pipeline = pipeline_from_catalog_file(&json);

    let response = pipeline.analyze(description).unwrap();

    assert_eq!(response.status, MatchStatus::Ok);
    assert_eq!(response.techniques.len(), 1);
    let technique = &response.techniques[0];
    assert_eq!(technique.id, "T1003");
    assert_eq!(technique.name, "Credential Dumping");
    assert!((technique.confidence - 1.0).abs() < 1e-4);
    assert_eq!(technique.description, description);
}

#[test]
fn test_response_json_shape_on_no_match() {
    let pipeline = pipeline_from_catalog_file(
        r#"[{"id":"T1566","name":"Phishing","description":"emails with malicious lures"}]"#,
    );

    let response = pipeline.analyze("entirely unrelated text").unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "no_match");
    assert_eq!(json["techniques"], serde_json::json!([]));
}

#[test]
fn test_empty_catalog_file_never_matches() {
    let pipeline = pipeline_from_catalog_file("[]");

    let response = pipeline.analyze("any narrative at all").unwrap();

    assert_eq!(response.status, MatchStatus::NoMatch);
}

#[test]
fn test_shared_pipeline_across_threads() {
    let description = "Remote system discovery using network scanning utilities";
    let embedder = Arc::new(CtiEmbedder::load(EncoderConfig::stub()).unwrap());
    let catalog = Catalog::from_entries(vec![entry(
        "T1018",
        "Remote System Discovery",
        description,
    )])
    .unwrap();
    let embedded = Arc::new(EmbeddedCatalog::embed(catalog, &embedder).unwrap());
    let pipeline = Arc::new(DensePipeline::new(embedder, embedded, 3, 0.55).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            let query = description.to_string();
            std::thread::spawn(move || pipeline.analyze(&query).unwrap())
        })
        .collect();

    for handle in handles {
        let response = handle.join().unwrap();
        assert_eq!(response.status, MatchStatus::Ok);
        assert_eq!(response.techniques[0].id, "T1018");
    }
}

#[test]
fn test_confidence_rounding_does_not_reorder() {
    // Two entries close enough that rounded confidences could collide;
    // ordering must still reflect the raw scores.
    let embedder = Arc::new(CtiEmbedder::load(EncoderConfig::stub()).unwrap());
    let catalog = Catalog::from_entries(vec![
        entry("T0001", "A", "one description"),
        entry("T0002", "B", "another description"),
    ])
    .unwrap();
    let embedded = Arc::new(EmbeddedCatalog::embed(catalog, &embedder).unwrap());
    let pipeline = DensePipeline::new(embedder, embedded, 3, 0.0).unwrap();

    let response = pipeline.analyze("one description").unwrap();

    assert_eq!(response.techniques.len(), 2);
    assert!(response.techniques[0].confidence >= response.techniques[1].confidence);
    assert_eq!(response.techniques[0].id, "T0001");
}
