//! Explanation synthesis.
//!
//! Builds a deterministic prompt and hands it to a generation backend
//! configured for non-sampling decoding. The output is an opaque string
//! consumed only for presentation; nothing here parses it.

pub mod config;
pub mod error;
pub mod prompt;

#[cfg(test)]
mod tests;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use prompt::build_prompt;

use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, info};

enum GeneratorBackend {
    Client(Box<Client>),
    Stub,
}

/// Generation oracle for explanations (supports stub mode).
pub struct ExplanationGenerator {
    backend: GeneratorBackend,
    config: GenerationConfig,
}

impl std::fmt::Debug for ExplanationGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationGenerator")
            .field(
                "backend",
                &match self.backend {
                    GeneratorBackend::Client(_) => "Client",
                    GeneratorBackend::Stub => "Stub",
                },
            )
            .field("model", &self.config.model)
            .field("max_tokens", &self.config.max_tokens)
            .finish()
    }
}

impl ExplanationGenerator {
    /// Creates a generator from a config (stub mode is supported).
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate()?;

        if config.testing_stub {
            info!("Explanation generator running in STUB mode (testing only)");
            return Ok(Self {
                backend: GeneratorBackend::Stub,
                config,
            });
        }

        info!(
            model = %config.model,
            max_tokens = config.max_tokens,
            "Explanation generator ready"
        );

        Ok(Self {
            backend: GeneratorBackend::Client(Box::new(Client::default())),
            config,
        })
    }

    pub fn stub() -> Result<Self, GenerationError> {
        Self::new(GenerationConfig::stub())
    }

    /// Generates an explanation for `prompt`.
    ///
    /// Decoding is deterministic: temperature 0.0 and a fixed token cap,
    /// so the same prompt yields the same explanation (backend willing).
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(prompt_len = prompt.len(), "Generating explanation");

        match &self.backend {
            GeneratorBackend::Client(client) => {
                let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
                let options = ChatOptions::default()
                    .with_temperature(0.0)
                    .with_max_tokens(self.config.max_tokens);

                let response = client
                    .exec_chat(&self.config.model, request, Some(&options))
                    .await
                    .map_err(|e| GenerationError::BackendFailed {
                        reason: e.to_string(),
                    })?;

                let text = response
                    .first_text()
                    .map(str::to_string)
                    .filter(|t| !t.is_empty())
                    .ok_or(GenerationError::EmptyResponse)?;

                Ok(text)
            }
            GeneratorBackend::Stub => Ok(format!("[stub explanation] {prompt}")),
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, GeneratorBackend::Stub)
    }

    /// Returns the generator configuration.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}
