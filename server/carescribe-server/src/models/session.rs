use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::{validate_field, validation::RequestValidation};

/// Recording pipeline state. `failed` is reachable from any state; a failed
/// generation is retryable. Clinical completion (diagnosis, duration) is
/// tracked separately via `completed_at` and does not gate the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    Recording,
    Transcribed,
    ChartReady,
    Failed,
}

/// Structured vital signs captured during a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Vitals {
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    /// Body temperature in °C.
    pub temperature: Option<f32>,
    pub spo2: Option<u8>,
}

impl RequestValidation for Vitals {
    fn validate(&self) -> ApiResult<()> {
        if let Some(systolic) = self.systolic {
            validate_field!(systolic, (40..=300).contains(&systolic), "Systolic pressure out of range");
        }
        if let Some(diastolic) = self.diastolic {
            validate_field!(diastolic, (20..=200).contains(&diastolic), "Diastolic pressure out of range");
        }
        if let Some(heart_rate) = self.heart_rate {
            validate_field!(heart_rate, (20..=300).contains(&heart_rate), "Heart rate out of range");
        }
        if let Some(temperature) = self.temperature {
            validate_field!(temperature, (25.0..=45.0).contains(&temperature), "Temperature out of range");
        }
        if let Some(spo2) = self.spo2 {
            validate_field!(spo2, spo2 <= 100, "SpO2 out of range");
        }
        Ok(())
    }
}

/// One recorded patient visit, linking patient, template, transcript and chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordingSession {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    /// Snapshot *reference*; the chart snapshots the section list itself at
    /// generation time.
    pub template_id: Uuid,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub duration_seconds: Option<u32>,
    pub vitals: Vitals,
    pub chief_complaint: Option<String>,
    pub diagnosis: Option<String>,
    pub icd_code: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional per-session retention override; falls back to the hospital
    /// policy, then the system default.
    pub retention_hours_override: Option<u32>,
}

impl RecordingSession {
    /// Whether a transcript may still be attached.
    pub fn accepts_transcript(&self) -> bool {
        matches!(self.status, SessionStatus::Created | SessionStatus::Recording)
    }
}

/// Who spoke a transcript segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Doctor,
    Patient,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptionSegment {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// The speech-to-text record of a visit conversation.
///
/// `segments: None` means the retention sweep scrubbed the content — a state
/// deliberately distinguishable from "no transcription was ever attached"
/// (no record at all).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transcription {
    pub id: Uuid,
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub segments: Option<Vec<TranscriptionSegment>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_ranges_are_enforced() {
        let ok = Vitals {
            systolic: Some(120),
            diastolic: Some(80),
            heart_rate: Some(72),
            temperature: Some(36.6),
            spo2: Some(98),
        };
        assert!(ok.validate().is_ok());

        let bad = Vitals {
            systolic: Some(999),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad_spo2 = Vitals {
            spo2: Some(150),
            ..Default::default()
        };
        assert!(bad_spo2.validate().is_err());
    }

    #[test]
    fn empty_vitals_are_valid() {
        assert!(Vitals::default().validate().is_ok());
    }
}
