//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `TECHLENS_*` environment
//! variables. [`Config::validate`] must pass before any pipeline is built.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_MAX_EXPLANATION_TOKENS, DEFAULT_RETRIEVAL_LIMIT, DEFAULT_SIMILARITY_THRESHOLD,
    DEFAULT_TOP_K,
};

/// Which pipeline shape to run for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineVariant {
    /// Dense similarity against the technique catalog.
    #[default]
    Dense,
    /// Retrieve evidence, rerank with the classifier, generate an explanation.
    Rag,
}

impl std::str::FromStr for PipelineVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(PipelineVariant::Dense),
            "rag" => Ok(PipelineVariant::Rag),
            other => Err(ConfigError::UnknownVariant {
                value: other.to_string(),
            }),
        }
    }
}

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TECHLENS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pipeline variant selected for this process. Default: `dense`.
    pub variant: PipelineVariant,

    /// Path to the technique catalog JSON file. Default: `./mitre_techniques.json`.
    pub catalog_path: PathBuf,

    /// Path to the classifier label→technique-id map (JSON array of ids).
    /// When unset, the built-in single-label default map is used.
    pub label_map_path: Option<PathBuf>,

    /// Root directory for model files. Relative `encoder_path` and
    /// `classifier_path` values resolve against it. Default: `./model_cache`.
    pub cache_dir: PathBuf,

    /// Encoder model directory, absolute or relative to `cache_dir`.
    /// Stub mode when unset.
    pub encoder_path: Option<PathBuf>,

    /// Classifier model directory, absolute or relative to `cache_dir`.
    /// Stub mode when unset.
    pub classifier_path: Option<PathBuf>,

    /// Qdrant endpoint for the evidence index. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Minimum cosine similarity for a dense match (inclusive).
    pub similarity_threshold: f32,

    /// Max catalog entries returned by the dense selector.
    pub top_k: usize,

    /// Max evidence passages requested per query.
    pub retrieval_limit: usize,

    /// Generation backend model name for explanations.
    pub generation_model: String,

    /// Token budget for generated explanations.
    pub max_explanation_tokens: u32,
}

/// Default Qdrant URL used when `TECHLENS_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default generation backend model.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: PipelineVariant::Dense,
            catalog_path: PathBuf::from("./mitre_techniques.json"),
            label_map_path: None,
            cache_dir: PathBuf::from("./model_cache"),
            encoder_path: None,
            classifier_path: None,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            max_explanation_tokens: DEFAULT_MAX_EXPLANATION_TOKENS,
        }
    }
}

impl Config {
    const ENV_VARIANT: &'static str = "TECHLENS_PIPELINE";
    const ENV_CATALOG_PATH: &'static str = "TECHLENS_CATALOG_PATH";
    const ENV_LABEL_MAP_PATH: &'static str = "TECHLENS_LABEL_MAP_PATH";
    const ENV_CACHE_DIR: &'static str = "TECHLENS_CACHE_DIR";
    const ENV_ENCODER_PATH: &'static str = "TECHLENS_ENCODER_PATH";
    const ENV_CLASSIFIER_PATH: &'static str = "TECHLENS_CLASSIFIER_PATH";
    const ENV_QDRANT_URL: &'static str = "TECHLENS_QDRANT_URL";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "TECHLENS_SIMILARITY_THRESHOLD";
    const ENV_TOP_K: &'static str = "TECHLENS_TOP_K";
    const ENV_RETRIEVAL_LIMIT: &'static str = "TECHLENS_RETRIEVAL_LIMIT";
    const ENV_GENERATION_MODEL: &'static str = "TECHLENS_GENERATION_MODEL";
    const ENV_MAX_EXPLANATION_TOKENS: &'static str = "TECHLENS_MAX_EXPLANATION_TOKENS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let variant = match Self::nonempty_var(Self::ENV_VARIANT) {
            Some(value) => value.parse()?,
            None => defaults.variant,
        };

        let catalog_path = Self::nonempty_var(Self::ENV_CATALOG_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);
        let label_map_path = Self::nonempty_var(Self::ENV_LABEL_MAP_PATH).map(PathBuf::from);
        let cache_dir = Self::nonempty_var(Self::ENV_CACHE_DIR)
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);
        let encoder_path = Self::nonempty_var(Self::ENV_ENCODER_PATH).map(PathBuf::from);
        let classifier_path = Self::nonempty_var(Self::ENV_CLASSIFIER_PATH).map(PathBuf::from);
        let qdrant_url =
            Self::nonempty_var(Self::ENV_QDRANT_URL).unwrap_or(defaults.qdrant_url.clone());

        let similarity_threshold = Self::parse_var(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        )?;
        let top_k = Self::parse_var(Self::ENV_TOP_K, defaults.top_k)?;
        let retrieval_limit = Self::parse_var(Self::ENV_RETRIEVAL_LIMIT, defaults.retrieval_limit)?;
        let generation_model = Self::nonempty_var(Self::ENV_GENERATION_MODEL)
            .unwrap_or(defaults.generation_model.clone());
        let max_explanation_tokens = Self::parse_var(
            Self::ENV_MAX_EXPLANATION_TOKENS,
            defaults.max_explanation_tokens,
        )?;

        Ok(Self {
            variant,
            catalog_path,
            label_map_path,
            cache_dir,
            encoder_path,
            classifier_path,
            qdrant_url,
            similarity_threshold,
            top_k,
            retrieval_limit,
            generation_model,
            max_explanation_tokens,
        })
    }

    /// Encoder model directory with a relative path resolved against `cache_dir`.
    pub fn resolved_encoder_path(&self) -> Option<PathBuf> {
        self.encoder_path
            .as_deref()
            .map(|path| self.resolve_model_path(path))
    }

    /// Classifier model directory with a relative path resolved against `cache_dir`.
    pub fn resolved_classifier_path(&self) -> Option<PathBuf> {
        self.classifier_path
            .as_deref()
            .map(|path| self.resolve_model_path(path))
    }

    fn resolve_model_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cache_dir.join(path)
        }
    }

    /// Validates paths and numeric invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::ZeroLimit { name: "top_k" });
        }

        if self.retrieval_limit == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "retrieval_limit",
            });
        }

        if !self.catalog_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.catalog_path.clone(),
            });
        }
        if !self.catalog_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.catalog_path.clone(),
            });
        }

        if let Some(ref path) = self.label_map_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if let Some(path) = self.resolved_encoder_path() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path });
            }
        }

        if let Some(path) = self.resolved_classifier_path() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path });
            }
        }

        if self.cache_dir.exists() && !self.cache_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.cache_dir.clone(),
            });
        }

        Ok(())
    }

    fn nonempty_var(name: &'static str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::nonempty_var(name) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::ParseError {
                var: name,
                value,
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}
