use axum::Json;
use utoipa::OpenApi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // Session endpoints
        crate::handlers::sessions::list_sessions,
        crate::handlers::sessions::start_session,
        crate::handlers::sessions::get_session,
        crate::handlers::sessions::begin_recording,
        crate::handlers::sessions::attach_transcript,
        crate::handlers::sessions::generate_chart,
        crate::handlers::sessions::complete_session,
        crate::handlers::sessions::copy_session_chart,

        // Chart endpoints
        crate::handlers::charts::edit_chart_section,

        // Patient endpoints
        crate::handlers::patients::list_patients,
        crate::handlers::patients::create_patient,
        crate::handlers::patients::get_patient,
        crate::handlers::patients::update_patient,
        crate::handlers::patients::set_patient_status,
        crate::handlers::patients::delete_patient,

        // Template endpoints
        crate::handlers::templates::list_templates,
        crate::handlers::templates::get_template,

        // Dashboard endpoints
        crate::handlers::dashboard::get_stats,

        // Settings, vocabulary and retention endpoints
        crate::handlers::settings::get_settings,
        crate::handlers::settings::update_settings,
        crate::handlers::keywords::list_keywords,
        crate::handlers::keywords::create_keyword,
        crate::handlers::keywords::delete_keyword,
        crate::handlers::retention::get_retention_policy,
        crate::handlers::retention::update_retention_policy,
    ),
    components(
        schemas(
            // Health schemas
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,

            // Session schemas
            crate::handlers::sessions::StartSessionRequest,
            crate::handlers::sessions::AttachTranscriptRequest,
            crate::handlers::sessions::CompleteSessionRequest,
            crate::handlers::sessions::SessionSummaryResponse,
            crate::handlers::sessions::SessionDetailResponse,
            crate::handlers::sessions::PatientSummary,
            crate::handlers::sessions::TemplateView,
            crate::handlers::sessions::SectionView,
            crate::handlers::sessions::TranscriptResponse,
            crate::handlers::sessions::CopyAllResponse,

            // Chart schemas
            crate::handlers::charts::EditChartSectionRequest,

            // Patient schemas
            crate::handlers::patients::CreatePatientRequest,
            crate::handlers::patients::UpdatePatientRequest,
            crate::handlers::patients::PatientStatusRequest,
            crate::handlers::patients::PatientResponse,

            // Settings, vocabulary and retention schemas
            crate::handlers::settings::SettingsResponse,
            crate::handlers::settings::UpdateSettingsRequest,
            crate::handlers::keywords::CreateKeywordRequest,
            crate::handlers::retention::RetentionPolicyResponse,
            crate::handlers::retention::UpdateRetentionPolicyRequest,

            // Domain schemas
            crate::models::RecordingSession,
            crate::models::SessionStatus,
            crate::models::Vitals,
            crate::models::Transcription,
            crate::models::TranscriptionSegment,
            crate::models::Speaker,
            crate::models::Chart,
            crate::models::ChartStatus,
            crate::models::Patient,
            crate::models::PatientStatus,
            crate::models::Gender,
            crate::models::Keyword,
            template_catalog::Template,
            template_catalog::TemplateSection,
            template_catalog::SectionStyle,
            dashboard_engine::DashboardStats,
            dashboard_engine::DayCount,
        )
    ),
    tags(
        (name = "health", description = "System health and version endpoints"),
        (name = "sessions", description = "Recording session pipeline"),
        (name = "charts", description = "Chart section editing"),
        (name = "patients", description = "Patient registry and lifecycle"),
        (name = "templates", description = "Chart template catalog"),
        (name = "dashboard", description = "Hospital dashboard statistics"),
        (name = "settings", description = "Clinician settings"),
        (name = "keywords", description = "Custom transcription vocabulary"),
        (name = "retention", description = "Transcript retention policies"),
    ),
    info(
        title = "CareScribe API",
        version = "1.0.0",
        description = "AI medical charting API: recording sessions, transcript retention, chart generation and dashboard statistics.",
        contact(
            name = "CareScribe Team",
            email = "api@carescribe.dev",
            url = "https://carescribe.dev"
        ),
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
