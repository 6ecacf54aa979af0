pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::config::GenerationProvider;
use crate::error::GenResult;
use crate::generation::{GenerationRequest, GenerationResult};

/// Trait for chart generation providers.
#[async_trait]
pub trait ChartProviderTrait: Send + Sync {
    /// Generate chart section content from a visit transcript.
    async fn generate(&self, request: &GenerationRequest) -> GenResult<GenerationResult>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Create a provider instance based on configuration.
pub fn create_provider(config: &GenerationProvider) -> GenResult<Box<dyn ChartProviderTrait>> {
    match config {
        GenerationProvider::Mock => Ok(Box::new(mock::MockProvider::new())),
        GenerationProvider::Http { .. } => Ok(Box::new(http::HttpProvider::new(config)?)),
    }
}
