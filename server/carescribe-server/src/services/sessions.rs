//! Recording session pipeline.
//!
//! State machine per session: `created → recording → transcribed →
//! chart_ready`, with `failed` reachable from any state and retryable.
//! Transcript reads resolve retention on every access — remaining lifetime is
//! a pure function of wall-clock time, never a stored field.

use std::collections::HashMap;

use chart_generation_service::{GenerationRequest, SectionSpec, SpeakerRole, SpokenSegment};
use chrono::{DateTime, Utc};
use retention_engine::{is_expired, seconds_until_deletion};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    Chart, ChartEdit, ChartStatus, PatientStatus, RecordingSession, SessionStatus, Speaker,
    Transcription, TranscriptionSegment, Vitals,
};
use crate::server::CareScribeServer;

/// What a transcript read yields once retention is resolved.
#[derive(Debug, Clone)]
pub enum TranscriptView {
    /// No transcription was ever attached.
    NotAttached,
    /// A transcription existed but its window elapsed; segments are gone.
    Expired { created_at: DateTime<Utc> },
    /// Transcription available, with its remaining lifetime.
    Available {
        transcription: Transcription,
        seconds_remaining: i64,
    },
}

/// Session pipeline operations over the server state.
pub struct SessionService<'a> {
    server: &'a CareScribeServer,
}

impl<'a> SessionService<'a> {
    pub fn new(server: &'a CareScribeServer) -> Self {
        Self { server }
    }

    /// Start a session in state `created`.
    ///
    /// The patient and template must be visible to the hospital; archived
    /// patients cannot start a visit.
    pub async fn start_session(
        &self,
        hospital_id: Uuid,
        user_id: Uuid,
        patient_id: Uuid,
        template_id: Uuid,
        chief_complaint: Option<String>,
        retention_hours_override: Option<u32>,
    ) -> ApiResult<RecordingSession> {
        let store = &self.server.store;
        store.get_hospital(hospital_id).await?;

        let user = store.get_user(user_id).await?;
        if user.hospital_id != hospital_id {
            return Err(ApiError::invalid_reference(
                "User does not belong to this hospital",
            ));
        }

        let patient = store.get_patient(patient_id).await?;
        if patient.hospital_id != hospital_id {
            return Err(ApiError::invalid_reference(
                "Patient is not visible to this hospital",
            ));
        }
        if patient.status == PatientStatus::Archived {
            return Err(ApiError::invalid_reference(
                "Archived patients cannot start a recording session",
            ));
        }

        if self.server.catalog.get_template(template_id).is_err() {
            return Err(ApiError::invalid_reference(
                "Template is not visible to this hospital",
            ));
        }

        let now = Utc::now();
        let session = RecordingSession {
            id: Uuid::new_v4(),
            hospital_id,
            user_id,
            patient_id,
            template_id,
            status: SessionStatus::Created,
            created_at: now,
            duration_seconds: None,
            vitals: Vitals::default(),
            chief_complaint,
            diagnosis: None,
            icd_code: None,
            completed_at: None,
            retention_hours_override,
        };
        store.insert_session(session.clone()).await;
        store
            .update_patient(patient_id, |p| {
                p.record_visit(now);
                Ok(())
            })
            .await?;

        info!(session_id = %session.id, hospital_id = %hospital_id, "Recording session started");
        Ok(session)
    }

    /// Mark capture as running. Idempotent while recording; rejected once a
    /// transcript exists.
    pub async fn begin_recording(&self, session_id: Uuid) -> ApiResult<RecordingSession> {
        self.server
            .store
            .update_session(session_id, |session| match session.status {
                SessionStatus::Created | SessionStatus::Recording => {
                    session.status = SessionStatus::Recording;
                    Ok(())
                }
                _ => Err(ApiError::conflict("Session is no longer recordable")),
            })
            .await
    }

    /// Attach the transcript produced at end of capture; at most once per
    /// session. The upstream capture deletes its audio upon successful
    /// transcription, so segments of text are the only artifact arriving here.
    pub async fn attach_transcript(
        &self,
        session_id: Uuid,
        segments: Vec<TranscriptionSegment>,
    ) -> ApiResult<Transcription> {
        let store = &self.server.store;
        let session = store.get_session(session_id).await?;
        if !session.accepts_transcript() {
            return Err(ApiError::conflict(
                "Session already has a transcription attached",
            ));
        }

        let transcription = Transcription {
            id: Uuid::new_v4(),
            session_id,
            created_at: Utc::now(),
            segments: Some(segments),
        };
        // The store-level uniqueness constraint decides concurrent duplicates.
        store.attach_transcription(transcription.clone()).await?;
        store
            .update_session(session_id, |s| {
                s.status = SessionStatus::Transcribed;
                Ok(())
            })
            .await?;

        info!(session_id = %session_id, "Transcript attached");
        Ok(transcription)
    }

    /// Resolve the transcript of a session under its retention policy,
    /// scrubbing lazily on access once expired.
    pub async fn transcript_view(
        &self,
        session: &RecordingSession,
        now: DateTime<Utc>,
    ) -> TranscriptView {
        let store = &self.server.store;
        let Some(transcription) = store.get_transcription(session.id).await else {
            return TranscriptView::NotAttached;
        };

        let hours = store.retention_hours_for(session).await;
        let seconds_remaining = seconds_until_deletion(transcription.created_at, hours, now);
        if seconds_remaining == 0 || transcription.segments.is_none() {
            // A zero-hour window deletes immediately after generation, so the
            // raw content must survive until the chart exists.
            let generation_done = session.status == SessionStatus::ChartReady;
            if transcription.segments.is_some() && (hours > 0 || generation_done) {
                store.scrub_transcription(session.id).await;
            }
            return TranscriptView::Expired {
                created_at: transcription.created_at,
            };
        }

        TranscriptView::Available {
            transcription,
            seconds_remaining,
        }
    }

    /// Generate the chart for a session via the external AI collaborator.
    ///
    /// Allowed when no chart exists or the previous attempt failed; a ready
    /// chart rejects regeneration so user edits are never clobbered. Failure
    /// or timeout leaves the session `failed` and retryable, never pending.
    pub async fn generate_chart(&self, session_id: Uuid) -> ApiResult<Chart> {
        let store = &self.server.store;
        let session = store.get_session(session_id).await?;

        let transcription = store
            .get_transcription(session_id)
            .await
            .ok_or_else(|| ApiError::conflict("Session has no transcript attached"))?;
        let segments = transcription.segments.clone().ok_or_else(|| {
            ApiError::validation("Transcript is no longer available for generation")
        })?;
        // A zero-hour window deletes after generation, so it does not gate
        // generation itself; any other window must still be live.
        let hours = store.retention_hours_for(&session).await;
        if hours > 0 && is_expired(transcription.created_at, hours, Utc::now()) {
            store.scrub_transcription(session_id).await;
            return Err(ApiError::validation(
                "Transcript is no longer available for generation",
            ));
        }

        let template = self.server.catalog.get_template(session.template_id)?;
        let user = store.get_user(session.user_id).await?;
        let style = user
            .ai_style
            .clone()
            .unwrap_or_else(|| self.server.generator.default_style().to_string());

        let now = Utc::now();
        let pending = Chart {
            id: Uuid::new_v4(),
            session_id,
            template_id: session.template_id,
            sections: template.sections.clone(),
            contents: HashMap::new(),
            status: ChartStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let pending = store.begin_chart_generation(pending).await?;

        let request = GenerationRequest {
            session_id,
            style,
            chief_complaint: session.chief_complaint.clone(),
            sections: pending
                .sections
                .iter()
                .map(|s| SectionSpec {
                    key: s.key.clone(),
                    name: s.name.clone(),
                })
                .collect(),
            segments: segments
                .iter()
                .map(|s| SpokenSegment {
                    speaker: match s.speaker {
                        Speaker::Doctor => SpeakerRole::Doctor,
                        Speaker::Patient => SpeakerRole::Patient,
                        Speaker::Unknown => SpeakerRole::Unknown,
                    },
                    text: s.text.clone(),
                    timestamp: s.timestamp,
                })
                .collect(),
        };

        match self.server.generator.generate(request).await {
            Ok(result) => {
                let now = Utc::now();
                let chart = store
                    .update_chart(session_id, |chart| {
                        chart.contents = result.contents;
                        chart.status = ChartStatus::Ready;
                        chart.updated_at = now;
                        Ok(())
                    })
                    .await?;
                store
                    .update_session(session_id, |s| {
                        s.status = SessionStatus::ChartReady;
                        Ok(())
                    })
                    .await?;
                // Zero-hour retention deletes the raw transcript right here.
                if hours == 0 {
                    store.scrub_transcription(session_id).await;
                }
                info!(session_id = %session_id, model = %result.model, "Chart generated");
                Ok(chart)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Chart generation failed");
                store
                    .update_chart(session_id, |chart| {
                        chart.status = ChartStatus::Failed;
                        Ok(())
                    })
                    .await?;
                store
                    .update_session(session_id, |s| {
                        s.status = SessionStatus::Failed;
                        Ok(())
                    })
                    .await?;
                Err(e.into())
            }
        }
    }

    /// Overwrite one section of a generated chart. Identical content is a
    /// no-op; a real change bumps `updated_at` and appends to the edit log.
    pub async fn edit_chart_section(
        &self,
        session_id: Uuid,
        section_key: &str,
        text: String,
        edited_by: Uuid,
    ) -> ApiResult<Chart> {
        let store = &self.server.store;
        let now = Utc::now();
        let mut changed = false;
        let chart = store
            .update_chart(session_id, |chart| {
                if !chart.has_section(section_key) {
                    return Err(ApiError::validation(format!(
                        "Unknown section key '{}'",
                        section_key
                    )));
                }
                if chart.contents.get(section_key) == Some(&text) {
                    return Ok(());
                }
                chart.contents.insert(section_key.to_string(), text.clone());
                chart.updated_at = now;
                changed = true;
                Ok(())
            })
            .await?;

        if changed {
            store
                .push_chart_edit(ChartEdit {
                    chart_id: chart.id,
                    section_key: section_key.to_string(),
                    edited_by,
                    edited_at: now,
                })
                .await;
        }
        Ok(chart)
    }

    /// Finalize the clinical summary fields, independent of chart text.
    pub async fn complete_session(
        &self,
        session_id: Uuid,
        diagnosis: Option<String>,
        icd_code: Option<String>,
        duration_seconds: Option<u32>,
        vitals: Option<Vitals>,
    ) -> ApiResult<RecordingSession> {
        self.server
            .store
            .update_session(session_id, |session| {
                session.diagnosis = diagnosis;
                session.icd_code = icd_code;
                session.duration_seconds = duration_seconds;
                if let Some(vitals) = vitals {
                    session.vitals = vitals;
                }
                session.completed_at = Some(Utc::now());
                Ok(())
            })
            .await
    }

    /// "Copy all" text: the chart's section snapshot in declared order.
    pub async fn copy_all(&self, session_id: Uuid) -> ApiResult<String> {
        let chart = self
            .server
            .store
            .get_chart(session_id)
            .await
            .ok_or_else(|| ApiError::not_found("chart"))?;
        Ok(template_catalog::copy_all(&chart.sections, &chart.contents))
    }
}
