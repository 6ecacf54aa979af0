use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Generation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    /// Whether the caller may retry the same request. Everything except a
    /// configuration mistake is retryable; the session stays `failed` until a
    /// retry succeeds.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::Config(_))
    }
}

/// Result alias for this crate. (`GenerationResult` is the generated-chart
/// payload type, so the alias gets the short name.)
pub type GenResult<T> = Result<T, GenerationError>;
