use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::{
    handlers::{
        charts, dashboard, health, keywords, patients, retention, sessions, settings, templates,
    },
    openapi,
    server::CareScribeServer,
};

/// Create health check routes
pub fn health_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version_info))
        .route("/api/v1/openapi.json", get(openapi::openapi_json))
}

/// Create recording session routes
pub fn session_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/api/v1/sessions", get(sessions::list_sessions))
        .route("/api/v1/sessions", post(sessions::start_session))
        .route("/api/v1/sessions/:id", get(sessions::get_session))
        .route("/api/v1/sessions/:id/recording", post(sessions::begin_recording))
        .route("/api/v1/sessions/:id/transcript", post(sessions::attach_transcript))
        .route("/api/v1/sessions/:id/chart", post(sessions::generate_chart))
        .route("/api/v1/sessions/:id/complete", post(sessions::complete_session))
        .route("/api/v1/sessions/:id/copy", get(sessions::copy_session_chart))
}

/// Create chart editing routes
pub fn chart_routes() -> Router<CareScribeServer> {
    Router::new().route("/api/v1/charts", put(charts::edit_chart_section))
}

/// Create patient management routes
pub fn patient_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/api/v1/patients", get(patients::list_patients))
        .route("/api/v1/patients", post(patients::create_patient))
        .route("/api/v1/patients/:id", get(patients::get_patient))
        .route("/api/v1/patients/:id", put(patients::update_patient))
        .route("/api/v1/patients/:id", delete(patients::delete_patient))
        .route("/api/v1/patients/:id/status", patch(patients::set_patient_status))
}

/// Create template catalog routes
pub fn template_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/api/v1/templates", get(templates::list_templates))
        .route("/api/v1/templates/:id", get(templates::get_template))
}

/// Create dashboard statistics routes
pub fn dashboard_routes() -> Router<CareScribeServer> {
    Router::new().route("/api/v1/dashboard/stats", get(dashboard::get_stats))
}

/// Create user settings and vocabulary routes
pub fn settings_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/api/v1/settings", get(settings::get_settings))
        .route("/api/v1/settings", put(settings::update_settings))
        .route("/api/v1/keywords", get(keywords::list_keywords))
        .route("/api/v1/keywords", post(keywords::create_keyword))
        .route("/api/v1/keywords/:id", delete(keywords::delete_keyword))
}

/// Create retention policy routes
pub fn retention_routes() -> Router<CareScribeServer> {
    Router::new()
        .route("/api/v1/retention-policy", get(retention::get_retention_policy))
        .route("/api/v1/retention-policy", put(retention::update_retention_policy))
}

/// Merge all route groups into the application router
pub fn create_routes() -> Router<CareScribeServer> {
    Router::new()
        .merge(health_routes())
        .merge(session_routes())
        .merge(chart_routes())
        .merge(patient_routes())
        .merge(template_routes())
        .merge(dashboard_routes())
        .merge(settings_routes())
        .merge(retention_routes())
}
