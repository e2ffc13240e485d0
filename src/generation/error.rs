use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The generation backend call failed. Fatal to the request; never
    /// converted into an empty explanation.
    #[error("generation backend request failed: {reason}")]
    BackendFailed { reason: String },

    /// The backend responded without any text content.
    #[error("generation backend returned no text")]
    EmptyResponse,

    #[error("invalid generation configuration: {reason}")]
    InvalidConfig { reason: String },
}
