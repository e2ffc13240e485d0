use super::*;

fn stub_embedder() -> CtiEmbedder {
    CtiEmbedder::load(EncoderConfig::stub()).expect("stub encoder should load")
}

#[test]
fn test_stub_embedding_is_unit_length() {
    let embedder = stub_embedder();
    let embedding = embedder.embed("PowerShell execution observed").unwrap();

    assert_eq!(embedding.len(), ENCODER_EMBEDDING_DIM);
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn test_stub_embedding_is_deterministic() {
    let embedder = stub_embedder();
    let a = embedder.embed("same input").unwrap();
    let b = embedder.embed("same input").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_embeddings_differ_across_inputs() {
    let embedder = stub_embedder();
    let a = embedder.embed("credential dumping from lsass").unwrap();
    let b = embedder.embed("spearphishing attachment").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_embed_batch_matches_single() {
    let embedder = stub_embedder();
    let single = embedder.embed("alpha").unwrap();
    let batch = embedder.embed_batch(&["alpha", "beta"]).unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], single);
}

#[test]
fn test_embed_batch_empty() {
    let embedder = stub_embedder();
    assert!(embedder.embed_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_empty_string_embeds_without_error() {
    let embedder = stub_embedder();
    let embedding = embedder.embed("").unwrap();
    assert_eq!(embedding.len(), ENCODER_EMBEDDING_DIM);
}

#[test]
fn test_is_stub() {
    assert!(stub_embedder().is_stub());
}

#[test]
fn test_validate_rejects_missing_model_in_non_stub_mode() {
    let config = EncoderConfig::default();
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::InvalidConfig { .. })
    ));

    let config = EncoderConfig::new("/nonexistent/model-dir");
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::ModelNotFound { .. })
    ));
}
