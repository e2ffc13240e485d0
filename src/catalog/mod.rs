//! Technique taxonomy catalog.
//!
//! The catalog is an immutable, ordered set of `{id, name, description}`
//! records loaded once per process. Order is stable and used only for
//! index-based lookup and tie-breaking, never semantically.

pub mod error;


pub use error::CatalogError;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::embedding::CtiEmbedder;

/// One labeled reference entry in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueEntry {
    /// Stable taxonomy code, e.g. `T1003`.
    pub id: String,
    /// Human-readable technique name.
    pub name: String,
    /// Prose description; this is the text that gets embedded.
    pub description: String,
}

/// Ordered, validated set of technique entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<TechniqueEntry>,
}

impl Catalog {
    /// Loads and validates a catalog from a JSON file (array of entries).
    ///
    /// An empty array is valid: a zero-entry catalog simply never matches.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<TechniqueEntry> =
            serde_json::from_str(&content).map_err(|e| CatalogError::ParseFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let catalog = Self::from_entries(entries)?;

        info!(
            path = %path.display(),
            entries = catalog.len(),
            "Technique catalog loaded"
        );

        Ok(catalog)
    }

    /// Validates entries and builds a catalog (insertion order preserved).
    pub fn from_entries(entries: Vec<TechniqueEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyField { index, field: "id" });
            }
            if entry.description.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    index,
                    field: "description",
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at catalog position `index`.
    pub fn get(&self, index: usize) -> Option<&TechniqueEntry> {
        self.entries.get(index)
    }

    /// Looks an entry up by technique id.
    pub fn find(&self, id: &str) -> Option<&TechniqueEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TechniqueEntry> {
        self.entries.iter()
    }
}

/// Catalog plus one precomputed unit-length embedding per entry.
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    catalog: Catalog,
    embeddings: Vec<Vec<f32>>,
    dim: usize,
}

impl EmbeddedCatalog {
    /// Embeds every catalog description with `embedder`.
    pub fn embed(catalog: Catalog, embedder: &CtiEmbedder) -> Result<Self, CatalogError> {
        let texts: Vec<&str> = catalog.iter().map(|e| e.description.as_str()).collect();

        debug!(entries = texts.len(), "Embedding catalog descriptions");

        let embeddings = embedder.embed_batch(&texts)?;

        Ok(Self {
            catalog,
            embeddings,
            dim: embedder.embedding_dim(),
        })
    }

    /// Builds from precomputed embeddings (used by tests and loaders that
    /// persist embeddings). Entry count and per-vector dimensions must agree.
    pub fn from_embeddings(
        catalog: Catalog,
        embeddings: Vec<Vec<f32>>,
        dim: usize,
    ) -> Result<Self, CatalogError> {
        if catalog.len() != embeddings.len() {
            return Err(CatalogError::EmbeddingCountMismatch {
                entries: catalog.len(),
                embeddings: embeddings.len(),
            });
        }

        if let Some(index) = embeddings.iter().position(|e| e.len() != dim) {
            return Err(CatalogError::EmbeddingDimMismatch {
                index,
                expected: dim,
                actual: embeddings[index].len(),
            });
        }

        Ok(Self {
            catalog,
            embeddings,
            dim,
        })
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Per-entry embeddings, same order as the catalog.
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Embedding dimension all vectors share.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// Classifier label index → technique id mapping.
///
/// The classifier's label space is opaque; this table is the declared,
/// validated bridge from label indices to taxonomy ids. Position in the
/// array is the label index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    ids: Vec<String>,
}

/// Technique id reported when no label map is configured. Matches the
/// mapping the single-label upstream deployment shipped with.
pub const DEFAULT_LABEL_TECHNIQUE_ID: &str = "T1059";

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            ids: vec![DEFAULT_LABEL_TECHNIQUE_ID.to_string()],
        }
    }
}

impl LabelMap {
    /// Loads a label map from a JSON file containing an array of technique ids.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::LabelMapLoadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let ids: Vec<String> =
            serde_json::from_str(&content).map_err(|e| CatalogError::LabelMapLoadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_ids(ids)
    }

    /// Builds a label map from an ordered id list.
    pub fn from_ids(ids: Vec<String>) -> Result<Self, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::EmptyLabelMap);
        }
        Ok(Self { ids })
    }

    /// Checks that every mapped id exists in the catalog.
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        for id in &self.ids {
            if catalog.find(id).is_none() {
                return Err(CatalogError::UnknownTechnique { id: id.clone() });
            }
        }
        Ok(())
    }

    /// Technique id for classifier label `index`.
    ///
    /// Out-of-range indices fall back to the last mapped id rather than
    /// panicking; the classifier's label count is validated against this
    /// map at pipeline construction, so the fallback only fires if the
    /// model and map disagree at runtime.
    pub fn technique_for_label(&self, index: usize) -> &str {
        self.ids
            .get(index)
            .unwrap_or_else(|| &self.ids[self.ids.len() - 1])
    }

    /// Number of labels in the map.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the map is empty (never constructible via the
    /// public API).
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
