use std::time::Duration;

use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::error::{GenResult, GenerationError};
use crate::generation::{GenerationRequest, GenerationResult};
use crate::providers::{create_provider, ChartProviderTrait};

/// Chart generation service: provider selection plus the timeout boundary.
pub struct ChartGenerationService {
    config: GenerationConfig,
    provider: Box<dyn ChartProviderTrait>,
}

impl ChartGenerationService {
    pub fn new(config: GenerationConfig) -> GenResult<Self> {
        let provider = create_provider(&config.provider)?;
        Ok(Self { config, provider })
    }

    /// Generate chart content, bounded by the configured timeout.
    ///
    /// A timeout is a retryable failure like any provider error; the call
    /// never leaves the caller waiting indefinitely.
    pub async fn generate(&self, request: GenerationRequest) -> GenResult<GenerationResult> {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        info!(
            session_id = %request.session_id,
            provider = self.provider.name(),
            sections = request.sections.len(),
            segments = request.segments.len(),
            "Generating chart"
        );

        match tokio::time::timeout(timeout, self.provider.generate(&request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    session_id = %request.session_id,
                    timeout_secs = self.config.timeout_secs,
                    "Chart generation timed out"
                );
                Err(GenerationError::Timeout(self.config.timeout_secs))
            }
        }
    }

    /// Note style to use when the user expressed no preference.
    pub fn default_style(&self) -> &str {
        &self.config.default_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationProvider;
    use crate::generation::{SectionSpec, SpeakerRole, SpokenSegment};
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    struct StalledProvider;

    #[async_trait]
    impl ChartProviderTrait for StalledProvider {
        async fn generate(&self, _request: &GenerationRequest) -> GenResult<GenerationResult> {
            // Never completes; generation must be bounded by the timeout.
            std::future::pending().await
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            session_id: Uuid::new_v4(),
            style: "concise".to_string(),
            chief_complaint: None,
            sections: vec![SectionSpec {
                key: "subjective".into(),
                name: "Subjective".into(),
            }],
            segments: vec![SpokenSegment {
                speaker: SpeakerRole::Patient,
                text: "dizzy".to_string(),
                timestamp: Utc::now(),
            }],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_times_out_as_retryable_failure() {
        let service = ChartGenerationService {
            config: GenerationConfig {
                provider: GenerationProvider::Mock,
                timeout_secs: 5,
                default_style: "concise".to_string(),
            },
            provider: Box::new(StalledProvider),
        };

        let err = service.generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(5)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn mock_provider_round_trips_through_service() {
        let service = ChartGenerationService::new(GenerationConfig::default()).unwrap();
        let result = service.generate(request()).await.unwrap();
        assert_eq!(result.contents.get("subjective").unwrap(), "dizzy");
        assert_eq!(result.model, "mock");
    }
}
