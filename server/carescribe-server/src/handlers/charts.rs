use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    models::Chart,
    server::CareScribeServer,
    services::SessionService,
    validate_required,
    validation::RequestValidation,
};

/// Edit one section of a generated chart. The chart may be addressed by its
/// own id or by the owning session's id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditChartSectionRequest {
    pub chart_id: Option<Uuid>,
    pub session_id: Option<Uuid>,
    pub section_key: String,
    pub text: String,
}

impl RequestValidation for EditChartSectionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.section_key, "Section key is required");
        if self.chart_id.is_none() && self.session_id.is_none() {
            return Err(ApiError::validation(
                "Either chart_id or session_id is required",
            ));
        }
        Ok(())
    }
}

/// Overwrite one chart section
#[utoipa::path(
    put,
    path = "/api/v1/charts",
    request_body = EditChartSectionRequest,
    responses(
        (status = 200, description = "Chart updated", body = Chart),
        (status = 400, description = "Invalid request or unknown section key"),
        (status = 404, description = "Chart not found")
    ),
    tag = "charts"
)]
pub async fn edit_chart_section(
    State(server): State<CareScribeServer>,
    Json(req): Json<EditChartSectionRequest>,
) -> Result<Json<ApiResponse<Chart>>, ApiError> {
    req.validate()?;

    let found = if let Some(chart_id) = req.chart_id {
        server.store.find_chart_by_id(chart_id).await
    } else if let Some(session_id) = req.session_id {
        server.store.get_chart(session_id).await
    } else {
        None
    };
    let chart = found.ok_or_else(|| ApiError::not_found("chart"))?;

    // Attribute the edit to the session's clinician.
    let session = server.store.get_session(chart.session_id).await?;
    let chart = SessionService::new(&server)
        .edit_chart_section(chart.session_id, &req.section_key, req.text, session.user_id)
        .await?;

    Ok(Json(api_success(chart)))
}
