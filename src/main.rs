//! Techlens CLI entrypoint.
//!
//! Invoked with the query narrative as the single positional argument;
//! prints the pipeline response as JSON on stdout. Logging goes to stderr
//! so stdout stays machine-readable.

use std::sync::Arc;

use mimalloc::MiMalloc;

use techlens::catalog::{Catalog, EmbeddedCatalog, LabelMap};
use techlens::config::{Config, PipelineVariant};
use techlens::embedding::{ClassifierConfig, CtiClassifier, CtiEmbedder, EncoderConfig};
use techlens::generation::{ExplanationGenerator, GenerationConfig};
use techlens::pipeline::{DensePipeline, RagPipeline};
use techlens::retrieval::{EVIDENCE_COLLECTION_NAME, QdrantEvidenceIndex};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    // Single positional argument; absent means an empty query, which is
    // valid input (and most likely a no-match).
    let query = std::env::args().nth(1).unwrap_or_default();

    tracing::info!(
        variant = ?config.variant,
        catalog = %config.catalog_path.display(),
        query_len = query.len(),
        "Techlens starting"
    );

    let catalog = Catalog::load(&config.catalog_path)?;

    let encoder_config = match config.resolved_encoder_path() {
        Some(path) => EncoderConfig::new(path),
        None => {
            tracing::warn!("No TECHLENS_ENCODER_PATH configured, running encoder in stub mode");
            EncoderConfig::stub()
        }
    };
    let embedder = Arc::new(CtiEmbedder::load(encoder_config)?);

    let output = match config.variant {
        PipelineVariant::Dense => {
            let embedded = Arc::new(EmbeddedCatalog::embed(catalog, &embedder)?);
            let pipeline = DensePipeline::new(
                embedder,
                embedded,
                config.top_k,
                config.similarity_threshold,
            )?;

            let response = pipeline.analyze(&query)?;
            serde_json::to_string(&response)?
        }
        PipelineVariant::Rag => {
            let classifier_config = match config.resolved_classifier_path() {
                Some(path) => ClassifierConfig::new(path),
                None => {
                    tracing::warn!(
                        "No TECHLENS_CLASSIFIER_PATH configured, running classifier in stub mode"
                    );
                    ClassifierConfig::stub()
                }
            };
            let classifier = Arc::new(CtiClassifier::load(classifier_config)?);

            let label_map = match &config.label_map_path {
                Some(path) => LabelMap::load(path)?,
                None => LabelMap::default(),
            };

            let retriever = QdrantEvidenceIndex::new(
                &config.qdrant_url,
                EVIDENCE_COLLECTION_NAME,
                embedder.clone(),
            )?;
            retriever.ensure_collection().await?;

            let generator = ExplanationGenerator::new(
                GenerationConfig::new(config.generation_model.clone())
                    .with_max_tokens(config.max_explanation_tokens),
            )?;

            let pipeline = RagPipeline::new(
                retriever,
                classifier,
                Arc::new(catalog),
                label_map,
                generator,
                config.retrieval_limit,
            )?;

            let response = pipeline.analyze(&query).await?;
            serde_json::to_string(&response)?
        }
    };

    println!("{output}");

    Ok(())
}
