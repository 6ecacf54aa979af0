use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who spoke a transcript segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Doctor,
    Patient,
    Unknown,
}

/// One transcript segment as handed to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenSegment {
    pub speaker: SpeakerRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A section the generator must produce content for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub key: String,
    pub name: String,
}

/// Request to generate chart content for one session.
///
/// The section list is the session template's snapshot; the generator must
/// key its output by these section keys and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub session_id: Uuid,
    /// Note style preference of the requesting user ("concise", "narrative", ...).
    pub style: String,
    pub chief_complaint: Option<String>,
    pub sections: Vec<SectionSpec>,
    pub segments: Vec<SpokenSegment>,
}

/// Generated chart content, keyed by section key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub contents: HashMap<String, String>,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
