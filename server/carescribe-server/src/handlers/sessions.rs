use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use template_catalog::{section_style, SectionStyle};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    models::{
        or_dash, Chart, RecordingSession, SessionStatus, Transcription, TranscriptionSegment,
        Vitals,
    },
    server::CareScribeServer,
    services::{SessionService, TranscriptView},
    validate_field, validate_length,
    validation::RequestValidation,
};

const DEFAULT_LIST_LIMIT: usize = 50;

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSessionsQuery {
    pub hospital_id: Uuid,
    pub patient_id: Option<Uuid>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub hospital_id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    pub template_id: Uuid,
    pub chief_complaint: Option<String>,
    /// Per-session retention override in hours; falls back to the hospital
    /// policy when absent.
    pub retention_hours_override: Option<u32>,
}

impl RequestValidation for StartSessionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref chief_complaint) = self.chief_complaint {
            validate_length!(
                chief_complaint,
                1,
                500,
                "Chief complaint must be between 1 and 500 characters"
            );
        }
        if let Some(hours) = self.retention_hours_override {
            validate_field!(
                hours,
                hours <= retention_engine::MAX_RETENTION_HOURS,
                "Retention override exceeds the maximum window"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachTranscriptRequest {
    pub segments: Vec<TranscriptionSegment>,
}

impl RequestValidation for AttachTranscriptRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(
            self.segments,
            !self.segments.is_empty(),
            "Transcript must contain at least one segment"
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteSessionRequest {
    pub diagnosis: Option<String>,
    pub icd_code: Option<String>,
    pub duration_seconds: Option<u32>,
    pub vitals: Option<Vitals>,
}

impl RequestValidation for CompleteSessionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref diagnosis) = self.diagnosis {
            validate_length!(diagnosis, 1, 200, "Diagnosis must be between 1 and 200 characters");
        }
        if let Some(ref icd_code) = self.icd_code {
            validate_length!(icd_code, 1, 16, "ICD code must be between 1 and 16 characters");
        }
        if let Some(ref vitals) = self.vitals {
            vitals.validate()?;
        }
        Ok(())
    }
}

/// One row of the session list: pipeline state plus embedded patient display
/// fields for the visit table.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSummaryResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub chart_number: String,
    pub status: SessionStatus,
    pub diagnosis: String,
    pub icd_code: String,
    pub created_at: DateTime<Utc>,
    /// Recording duration as `M:SS`, `-` when unknown.
    pub duration_formatted: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientSummary {
    pub id: Uuid,
    pub name: String,
    /// Whole years, derived from the birth date as of today.
    pub age: u32,
    pub gender: crate::models::Gender,
    pub chart_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionView {
    pub key: String,
    pub name: String,
    pub style: SectionStyle,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateView {
    pub id: Uuid,
    pub name: String,
    pub sections: Vec<SectionView>,
}

/// Transcript state as the detail view renders it. Expiry is a successful
/// response with `expired: true`, never an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    pub attached: bool,
    pub expired: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub retention_seconds_remaining: Option<i64>,
    /// `HH:MM:SS` countdown, or the expired label.
    pub retention_countdown: Option<String>,
    pub segments: Option<Vec<TranscriptionSegment>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDetailResponse {
    pub id: Uuid,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub icd_code: String,
    pub duration_formatted: String,
    pub vitals: Vitals,
    /// `None` when the patient was hard-deleted after archiving.
    pub patient: Option<PatientSummary>,
    pub template: TemplateView,
    pub chart: Option<Chart>,
    pub transcript: TranscriptResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CopyAllResponse {
    /// All sections in template-declared order, `[Name]\ncontent` blocks
    /// separated by blank lines.
    pub text: String,
}

fn format_duration(duration_seconds: Option<u32>) -> String {
    match duration_seconds {
        Some(seconds) => dashboard_engine::format_minutes_seconds(seconds),
        None => "-".to_string(),
    }
}

fn transcript_response(view: TranscriptView) -> TranscriptResponse {
    match view {
        TranscriptView::NotAttached => TranscriptResponse {
            attached: false,
            expired: false,
            created_at: None,
            retention_seconds_remaining: None,
            retention_countdown: None,
            segments: None,
        },
        TranscriptView::Expired { created_at } => TranscriptResponse {
            attached: true,
            expired: true,
            created_at: Some(created_at),
            retention_seconds_remaining: Some(0),
            retention_countdown: Some(retention_engine::format_countdown(0)),
            segments: None,
        },
        TranscriptView::Available {
            transcription,
            seconds_remaining,
        } => TranscriptResponse {
            attached: true,
            expired: false,
            created_at: Some(transcription.created_at),
            retention_seconds_remaining: Some(seconds_remaining),
            retention_countdown: Some(retention_engine::format_countdown(seconds_remaining)),
            segments: transcription.segments,
        },
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// List recording sessions of a hospital, newest first
#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    params(ListSessionsQuery),
    responses(
        (status = 200, description = "Sessions retrieved successfully", body = Vec<SessionSummaryResponse>),
        (status = 404, description = "Hospital not found")
    ),
    tag = "sessions"
)]
pub async fn list_sessions(
    State(server): State<CareScribeServer>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<ApiResponse<Vec<SessionSummaryResponse>>>, ApiError> {
    server.store.get_hospital(query.hospital_id).await?;

    let sessions = server
        .store
        .list_sessions(
            query.hospital_id,
            query.patient_id,
            query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        )
        .await;

    let mut rows = Vec::with_capacity(sessions.len());
    for session in sessions {
        // The patient may have been archived and hard-deleted since.
        let patient = server.store.get_patient(session.patient_id).await.ok();
        rows.push(SessionSummaryResponse {
            id: session.id,
            patient_id: session.patient_id,
            patient_name: or_dash(patient.as_ref().map(|p| p.name.as_str())),
            chart_number: or_dash(patient.as_ref().map(|p| p.chart_number.as_str())),
            status: session.status,
            diagnosis: or_dash(session.diagnosis.as_deref()),
            icd_code: or_dash(session.icd_code.as_deref()),
            created_at: session.created_at,
            duration_formatted: format_duration(session.duration_seconds),
        });
    }

    Ok(Json(api_success(rows)))
}

/// Start a new recording session
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = StartSessionRequest,
    responses(
        (status = 201, description = "Session started", body = RecordingSession),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Hospital not found"),
        (status = 422, description = "Patient or template not visible to this hospital")
    ),
    tag = "sessions"
)]
pub async fn start_session(
    State(server): State<CareScribeServer>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecordingSession>>), ApiError> {
    req.validate()?;

    let session = SessionService::new(&server)
        .start_session(
            req.hospital_id,
            req.user_id,
            req.patient_id,
            req.template_id,
            req.chief_complaint,
            req.retention_hours_override,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(api_success(session))))
}

/// Get the full detail view of one session
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session detail", body = SessionDetailResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionDetailResponse>>, ApiError> {
    let session = server.store.get_session(id).await?;
    let service = SessionService::new(&server);

    let patient = server.store.get_patient(session.patient_id).await.ok();
    let template = server.catalog.get_template(session.template_id)?;
    let chart = server.store.get_chart(session.id).await;
    let transcript = transcript_response(service.transcript_view(&session, Utc::now()).await);

    let today = Utc::now().date_naive();
    let detail = SessionDetailResponse {
        id: session.id,
        status: session.status,
        created_at: session.created_at,
        completed_at: session.completed_at,
        chief_complaint: or_dash(session.chief_complaint.as_deref()),
        diagnosis: or_dash(session.diagnosis.as_deref()),
        icd_code: or_dash(session.icd_code.as_deref()),
        duration_formatted: format_duration(session.duration_seconds),
        vitals: session.vitals.clone(),
        patient: patient.map(|p| PatientSummary {
            id: p.id,
            age: p.age(today),
            name: p.name,
            gender: p.gender,
            chart_number: p.chart_number,
        }),
        template: TemplateView {
            id: template.id,
            name: template.name.clone(),
            sections: template
                .sections
                .iter()
                .map(|s| SectionView {
                    key: s.key.clone(),
                    name: s.name.clone(),
                    style: section_style(s),
                })
                .collect(),
        },
        chart,
        transcript,
    };

    Ok(Json(api_success(detail)))
}

/// Mark capture as running
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/recording",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Recording started", body = RecordingSession),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is no longer recordable")
    ),
    tag = "sessions"
)]
pub async fn begin_recording(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RecordingSession>>, ApiError> {
    let session = SessionService::new(&server).begin_recording(id).await?;
    Ok(Json(api_success(session)))
}

/// Attach the transcript produced at end of capture
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/transcript",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = AttachTranscriptRequest,
    responses(
        (status = 201, description = "Transcript attached", body = Transcription),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session already has a transcription")
    ),
    tag = "sessions"
)]
pub async fn attach_transcript(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<AttachTranscriptRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Transcription>>), ApiError> {
    req.validate()?;

    let transcription = SessionService::new(&server)
        .attach_transcript(id, req.segments)
        .await?;

    Ok((StatusCode::CREATED, Json(api_success(transcription))))
}

/// Generate the chart for a session
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/chart",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 201, description = "Chart generated", body = Chart),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Chart already generated or generation in flight"),
        (status = 502, description = "External generation failed; retryable")
    ),
    tag = "sessions"
)]
pub async fn generate_chart(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<Chart>>), ApiError> {
    let chart = SessionService::new(&server).generate_chart(id).await?;
    Ok((StatusCode::CREATED, Json(api_success(chart))))
}

/// Finalize the clinical summary fields of a session
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/complete",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = CompleteSessionRequest,
    responses(
        (status = 200, description = "Session completed", body = RecordingSession),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn complete_session(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteSessionRequest>,
) -> Result<Json<ApiResponse<RecordingSession>>, ApiError> {
    req.validate()?;

    let session = SessionService::new(&server)
        .complete_session(id, req.diagnosis, req.icd_code, req.duration_seconds, req.vitals)
        .await?;

    Ok(Json(api_success(session)))
}

/// Clipboard export of the whole chart
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}/copy",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Copy-all text", body = CopyAllResponse),
        (status = 404, description = "Session or chart not found")
    ),
    tag = "sessions"
)]
pub async fn copy_session_chart(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CopyAllResponse>>, ApiError> {
    // 404 for a missing session, 404 for a session that has no chart yet.
    server.store.get_session(id).await?;
    let text = SessionService::new(&server).copy_all(id).await?;
    Ok(Json(api_success(CopyAllResponse { text })))
}
