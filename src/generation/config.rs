use crate::constants::DEFAULT_MAX_EXPLANATION_TOKENS;

use super::error::GenerationError;

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Backend model name passed to the genai client.
    pub model: String,

    /// Hard cap on generated tokens.
    pub max_tokens: u32,

    /// If true, produce deterministic template output without a backend.
    pub testing_stub: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: crate::config::DEFAULT_GENERATION_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_EXPLANATION_TOKENS,
            testing_stub: false,
        }
    }
}

impl GenerationConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.testing_stub && self.model.trim().is_empty() {
            return Err(GenerationError::InvalidConfig {
                reason: "model name is required (stubbing is disabled)".to_string(),
            });
        }

        if self.max_tokens == 0 {
            return Err(GenerationError::InvalidConfig {
                reason: "max_tokens must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
