use std::path::PathBuf;

/// Default classifier label count.
pub const DEFAULT_LABEL_COUNT: usize = crate::constants::DEFAULT_LABEL_COUNT;

/// Max sequence length for the (query, passage) pair input.
pub const CLASSIFIER_MAX_SEQ_LEN: usize = 512;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// HF model directory. Stub mode when `None`.
    pub model_path: Option<PathBuf>,

    /// Width of the classification head / logit vector.
    pub label_count: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            label_count: DEFAULT_LABEL_COUNT,
        }
    }
}

impl ClassifierConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            label_count: DEFAULT_LABEL_COUNT,
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_label_count(mut self, label_count: usize) -> Self {
        assert!(label_count >= 1, "label_count must be at least 1");
        self.label_count = label_count;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.label_count == 0 {
            return Err("label_count must be at least 1".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
