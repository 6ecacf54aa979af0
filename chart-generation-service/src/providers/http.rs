use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationProvider;
use crate::error::{GenResult, GenerationError};
use crate::generation::{GenerationRequest, GenerationResult};
use crate::providers::ChartProviderTrait;

/// Provider that POSTs the framed request to an external generation endpoint.
pub struct HttpProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    #[serde(flatten)]
    request: &'a GenerationRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct WireResponse {
    contents: HashMap<String, String>,
    #[serde(default)]
    model: Option<String>,
}

impl HttpProvider {
    pub fn new(config: &GenerationProvider) -> GenResult<Self> {
        match config {
            GenerationProvider::Http {
                api_url,
                api_key,
                model,
            } => Ok(Self {
                client: reqwest::Client::new(),
                api_url: api_url.clone(),
                api_key: api_key.clone(),
                model: model.clone(),
            }),
            _ => Err(GenerationError::Config(
                "HttpProvider requires an http provider config".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ChartProviderTrait for HttpProvider {
    async fn generate(&self, request: &GenerationRequest) -> GenResult<GenerationResult> {
        debug!(session_id = %request.session_id, url = %self.api_url, "Dispatching chart generation");

        let mut call = self.client.post(&self.api_url).json(&WireRequest {
            request,
            model: self.model.as_deref(),
        });
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        if !response.status().is_success() {
            return Err(GenerationError::Provider(format!(
                "Generation endpoint returned {}",
                response.status()
            )));
        }

        let wire: WireResponse = response.json().await?;
        Ok(GenerationResult {
            contents: wire.contents,
            model: wire.model.unwrap_or_else(|| "external".to_string()),
            generated_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
