use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::error::GenResult;
use crate::generation::{GenerationRequest, GenerationResult, SpeakerRole};
use crate::providers::ChartProviderTrait;

/// Deterministic provider for development and tests.
///
/// Maps patient speech to the `subjective` section and doctor speech to
/// `objective`; other sections are filled only when a chief complaint exists
/// to anchor them. Output depends solely on the request, so tests can assert
/// on it.
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChartProviderTrait for MockProvider {
    async fn generate(&self, request: &GenerationRequest) -> GenResult<GenerationResult> {
        debug!(session_id = %request.session_id, sections = request.sections.len(), "Mock chart generation");

        let patient_text = join_speech(request, SpeakerRole::Patient);
        let doctor_text = join_speech(request, SpeakerRole::Doctor);

        let mut contents = HashMap::new();
        for section in &request.sections {
            let body = match section.key.as_str() {
                "subjective" => patient_text
                    .clone()
                    .or_else(|| request.chief_complaint.clone()),
                "objective" => doctor_text.clone(),
                _ => request
                    .chief_complaint
                    .as_ref()
                    .map(|cc| format!("{} for: {}", section.name, cc)),
            };
            if let Some(body) = body {
                contents.insert(section.key.clone(), body);
            }
        }

        Ok(GenerationResult {
            contents,
            model: "mock".to_string(),
            generated_at: Utc::now(),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn join_speech(request: &GenerationRequest, role: SpeakerRole) -> Option<String> {
    let joined = request
        .segments
        .iter()
        .filter(|s| s.speaker == role)
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{SectionSpec, SpokenSegment};
    use uuid::Uuid;

    fn request() -> GenerationRequest {
        GenerationRequest {
            session_id: Uuid::new_v4(),
            style: "concise".to_string(),
            chief_complaint: Some("headache".to_string()),
            sections: vec![
                SectionSpec { key: "subjective".into(), name: "Subjective".into() },
                SectionSpec { key: "objective".into(), name: "Objective".into() },
                SectionSpec { key: "plan".into(), name: "Plan".into() },
            ],
            segments: vec![
                SpokenSegment {
                    speaker: SpeakerRole::Patient,
                    text: "My head hurts since Monday".to_string(),
                    timestamp: Utc::now(),
                },
                SpokenSegment {
                    speaker: SpeakerRole::Doctor,
                    text: "No neurological deficits observed".to_string(),
                    timestamp: Utc::now(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn output_keys_come_from_requested_sections() {
        let result = MockProvider::new().generate(&request()).await.unwrap();
        assert_eq!(
            result.contents.get("subjective").unwrap(),
            "My head hurts since Monday"
        );
        assert_eq!(
            result.contents.get("objective").unwrap(),
            "No neurological deficits observed"
        );
        assert!(result.contents.contains_key("plan"));
        assert!(!result.contents.contains_key("assessment"));
    }

    #[tokio::test]
    async fn deterministic_for_identical_requests() {
        let provider = MockProvider::new();
        let a = provider.generate(&request()).await.unwrap();
        let b = provider.generate(&request()).await.unwrap();
        assert_eq!(a.contents, b.contents);
    }
}
