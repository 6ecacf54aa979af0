use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use template_catalog::Template;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    server::CareScribeServer,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTemplatesQuery {
    /// Restrict to one specialty's templates plus the general ones.
    pub specialty: Option<String>,
}

/// List chart templates
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    params(ListTemplatesQuery),
    responses(
        (status = 200, description = "Templates retrieved successfully", body = Vec<Template>)
    ),
    tag = "templates"
)]
pub async fn list_templates(
    State(server): State<CareScribeServer>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<ApiResponse<Vec<Template>>>, ApiError> {
    let templates: Vec<Template> = match query.specialty.as_deref() {
        Some(specialty) => server.catalog.list_for_specialty(specialty),
        None => server.catalog.list_all(),
    }
    .into_iter()
    .cloned()
    .collect();

    Ok(Json(api_success(templates)))
}

/// Get one template
#[utoipa::path(
    get,
    path = "/api/v1/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template detail", body = Template),
        (status = 404, description = "Template not found")
    ),
    tag = "templates"
)]
pub async fn get_template(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Template>>, ApiError> {
    let template = server.catalog.get_template(id)?.clone();
    Ok(Json(api_success(template)))
}
