use serde::{Deserialize, Serialize};

use crate::error::{GenResult, GenerationError};

/// Provider-specific configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Deterministic local generator for development and tests.
    Mock,
    /// JSON POST to a self-hosted or contracted generation endpoint.
    Http {
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    },
}

/// Chart generation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub provider: GenerationProvider,
    /// Upper bound on one provider call; an elapsed timeout surfaces as a
    /// retryable failure, never as a session stuck in `pending`.
    pub timeout_secs: u64,
    /// Default note style when the requesting user has no preference set.
    pub default_style: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::Mock,
            timeout_secs: 30,
            default_style: "concise".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> GenResult<Self> {
        let timeout_secs = std::env::var("CHART_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let default_style = std::env::var("CHART_GEN_STYLE")
            .unwrap_or_else(|_| "concise".to_string());

        let provider = match std::env::var("CHART_GEN_PROVIDER") {
            Ok(name) => match name.to_lowercase().as_str() {
                "mock" => GenerationProvider::Mock,
                "http" => GenerationProvider::Http {
                    api_url: std::env::var("CHART_GEN_API_URL")
                        .unwrap_or_else(|_| "http://localhost:8900/v1/generate".to_string()),
                    api_key: std::env::var("CHART_GEN_API_KEY").ok(),
                    model: std::env::var("CHART_GEN_MODEL").ok(),
                },
                other => {
                    return Err(GenerationError::Config(format!(
                        "Unknown chart generation provider: {}",
                        other
                    )))
                }
            },
            Err(_) => GenerationProvider::Mock,
        };

        Ok(Self {
            provider,
            timeout_secs,
            default_style,
        })
    }
}
