//! Qdrant-backed evidence index.

use std::collections::HashMap;
use std::sync::Arc;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use tracing::{debug, info};

use crate::embedding::CtiEmbedder;

use super::error::EvidenceError;
use super::{EvidenceStore, Passage};

/// Evidence retrieval over a Qdrant collection of embedded passages.
///
/// The index owns its embedder: callers hand it query text and get passages
/// back, which keeps the retrieval stage an opaque oracle to the pipeline.
pub struct QdrantEvidenceIndex {
    client: Qdrant,
    url: String,
    collection: String,
    embedder: Arc<CtiEmbedder>,
}

impl QdrantEvidenceIndex {
    /// Creates an index client for `url` and `collection`.
    pub fn new(
        url: &str,
        collection: impl Into<String>,
        embedder: Arc<CtiEmbedder>,
    ) -> Result<Self, EvidenceError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| EvidenceError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.into(),
            embedder,
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Ensures the evidence collection exists (creates it if missing).
    pub async fn ensure_collection(&self) -> Result<(), EvidenceError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| EvidenceError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            let vectors_config = VectorParamsBuilder::new(
                self.embedder.embedding_dim() as u64,
                Distance::Cosine,
            );

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(vectors_config)
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| EvidenceError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

            info!(collection = %self.collection, "Evidence collection created");
        }

        Ok(())
    }

    /// Embeds and upserts a passage corpus, assigning sequential ids
    /// starting at `base_id`.
    pub async fn index_passages(
        &self,
        base_id: u64,
        passages: &[&str],
    ) -> Result<(), EvidenceError> {
        if passages.is_empty() {
            return Ok(());
        }

        let embeddings = self.embedder.embed_batch(passages)?;

        let points: Vec<PointStruct> = passages
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(offset, (text, vector))| {
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("text".to_string(), (*text).into());
                PointStruct::new(base_id + offset as u64, vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| EvidenceError::IndexFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        debug!(
            collection = %self.collection,
            passages = passages.len(),
            "Passages indexed"
        );

        Ok(())
    }
}

impl EvidenceStore for QdrantEvidenceIndex {
    async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<Passage>, EvidenceError> {
        let query_vector = self.embedder.embed(query)?;

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query_vector, limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| EvidenceError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let passages: Vec<Passage> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let text = point.payload.get("text")?.as_str()?.to_string();
                Some(Passage::new(text, point.score))
            })
            .collect();

        debug!(
            query_len = query.len(),
            passages = passages.len(),
            "Evidence retrieved"
        );

        Ok(passages)
    }
}
