use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_techlens_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("TECHLENS_PIPELINE");
        env::remove_var("TECHLENS_CATALOG_PATH");
        env::remove_var("TECHLENS_LABEL_MAP_PATH");
        env::remove_var("TECHLENS_CACHE_DIR");
        env::remove_var("TECHLENS_ENCODER_PATH");
        env::remove_var("TECHLENS_CLASSIFIER_PATH");
        env::remove_var("TECHLENS_QDRANT_URL");
        env::remove_var("TECHLENS_SIMILARITY_THRESHOLD");
        env::remove_var("TECHLENS_TOP_K");
        env::remove_var("TECHLENS_RETRIEVAL_LIMIT");
        env::remove_var("TECHLENS_GENERATION_MODEL");
        env::remove_var("TECHLENS_MAX_EXPLANATION_TOKENS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.variant, PipelineVariant::Dense);
    assert_eq!(config.catalog_path, PathBuf::from("./mitre_techniques.json"));
    assert!(config.label_map_path.is_none());
    assert_eq!(config.cache_dir, PathBuf::from("./model_cache"));
    assert!(config.encoder_path.is_none());
    assert!(config.classifier_path.is_none());
    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.similarity_threshold, 0.55);
    assert_eq!(config.top_k, 3);
    assert_eq!(config.retrieval_limit, 5);
    assert_eq!(config.max_explanation_tokens, 200);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_techlens_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.variant, PipelineVariant::Dense);
    assert_eq!(config.top_k, 3);
    assert_eq!(config.similarity_threshold, 0.55);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_techlens_env();

    let config = with_env_vars(
        &[
            ("TECHLENS_PIPELINE", "rag"),
            ("TECHLENS_CATALOG_PATH", "/tmp/catalog.json"),
            ("TECHLENS_SIMILARITY_THRESHOLD", "0.7"),
            ("TECHLENS_TOP_K", "5"),
            ("TECHLENS_QDRANT_URL", "http://qdrant:6334"),
        ],
        || Config::from_env().expect("should parse overrides"),
    );

    assert_eq!(config.variant, PipelineVariant::Rag);
    assert_eq!(config.catalog_path, PathBuf::from("/tmp/catalog.json"));
    assert_eq!(config.similarity_threshold, 0.7);
    assert_eq!(config.top_k, 5);
    assert_eq!(config.qdrant_url, "http://qdrant:6334");
}

#[test]
#[serial]
fn test_from_env_rejects_bad_variant() {
    clear_techlens_env();

    let result = with_env_vars(&[("TECHLENS_PIPELINE", "hybrid")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::UnknownVariant { value }) if value == "hybrid"));
}

#[test]
#[serial]
fn test_from_env_rejects_unparsable_top_k() {
    clear_techlens_env();

    let result = with_env_vars(&[("TECHLENS_TOP_K", "three")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::ParseError { var, .. }) if var == "TECHLENS_TOP_K"));
}

#[test]
#[serial]
fn test_from_env_ignores_empty_values() {
    clear_techlens_env();

    let config = with_env_vars(&[("TECHLENS_ENCODER_PATH", "  ")], || {
        Config::from_env().expect("empty value should fall back to default")
    });

    assert!(config.encoder_path.is_none());
}

#[test]
fn test_relative_model_paths_resolve_under_cache_dir() {
    let config = Config {
        cache_dir: PathBuf::from("/models"),
        encoder_path: Some(PathBuf::from("cti-bert")),
        classifier_path: Some(PathBuf::from("/opt/classifier")),
        ..Default::default()
    };

    assert_eq!(
        config.resolved_encoder_path(),
        Some(PathBuf::from("/models/cti-bert"))
    );
    // Absolute paths bypass the cache dir.
    assert_eq!(
        config.resolved_classifier_path(),
        Some(PathBuf::from("/opt/classifier"))
    );
}

#[test]
fn test_validate_checks_resolved_model_paths() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, "[]").unwrap();
    std::fs::create_dir(dir.path().join("cti-bert")).unwrap();

    let config = Config {
        catalog_path: catalog,
        cache_dir: dir.path().to_path_buf(),
        encoder_path: Some(PathBuf::from("cti-bert")),
        ..Default::default()
    };

    config
        .validate()
        .expect("relative encoder path under cache_dir should validate");

    let missing = Config {
        cache_dir: PathBuf::from("/nonexistent-cache"),
        ..config
    };

    assert!(matches!(
        missing.validate(),
        Err(ConfigError::PathNotFound { path }) if path == PathBuf::from("/nonexistent-cache/cti-bert")
    ));
}

#[test]
fn test_validate_rejects_out_of_range_threshold() {
    let config = Config {
        similarity_threshold: 1.5,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, "[]").unwrap();

    let config = Config {
        catalog_path: catalog,
        top_k: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroLimit { name: "top_k" })
    ));
}

#[test]
fn test_validate_rejects_missing_catalog() {
    let config = Config {
        catalog_path: PathBuf::from("/nonexistent/catalog.json"),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_accepts_existing_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, "[]").unwrap();

    let config = Config {
        catalog_path: catalog,
        ..Default::default()
    };

    config.validate().expect("config should validate");
}

#[test]
fn test_variant_parsing_is_case_insensitive() {
    assert_eq!(
        "Dense".parse::<PipelineVariant>().unwrap(),
        PipelineVariant::Dense
    );
    assert_eq!(
        "RAG".parse::<PipelineVariant>().unwrap(),
        PipelineVariant::Rag
    );
}
