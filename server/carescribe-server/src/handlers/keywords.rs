use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    models::Keyword,
    server::CareScribeServer,
    validate_length, validate_required,
    validation::RequestValidation,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct KeywordsQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateKeywordRequest {
    pub user_id: Uuid,
    /// Vocabulary term fed to transcription, unique per user.
    pub term: String,
}

impl RequestValidation for CreateKeywordRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.term, "Keyword term is required");
        validate_length!(self.term, 1, 50, "Keyword must be between 1 and 50 characters");
        Ok(())
    }
}

/// List a user's custom vocabulary
#[utoipa::path(
    get,
    path = "/api/v1/keywords",
    params(KeywordsQuery),
    responses(
        (status = 200, description = "Keywords retrieved successfully", body = Vec<Keyword>),
        (status = 404, description = "User not found")
    ),
    tag = "keywords"
)]
pub async fn list_keywords(
    State(server): State<CareScribeServer>,
    Query(query): Query<KeywordsQuery>,
) -> Result<Json<ApiResponse<Vec<Keyword>>>, ApiError> {
    server.store.get_user(query.user_id).await?;
    let keywords = server.store.list_keywords(query.user_id).await;
    Ok(Json(api_success(keywords)))
}

/// Register a custom vocabulary term
#[utoipa::path(
    post,
    path = "/api/v1/keywords",
    request_body = CreateKeywordRequest,
    responses(
        (status = 201, description = "Keyword created", body = Keyword),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Keyword already registered for this user")
    ),
    tag = "keywords"
)]
pub async fn create_keyword(
    State(server): State<CareScribeServer>,
    Json(req): Json<CreateKeywordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Keyword>>), ApiError> {
    req.validate()?;
    server.store.get_user(req.user_id).await?;

    let keyword = server
        .store
        .insert_keyword(Keyword {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            term: req.term.trim().to_string(),
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(api_success(keyword))))
}

/// Delete a custom vocabulary term
#[utoipa::path(
    delete,
    path = "/api/v1/keywords/{id}",
    params(("id" = Uuid, Path, description = "Keyword id")),
    responses(
        (status = 204, description = "Keyword deleted"),
        (status = 404, description = "Keyword not found")
    ),
    tag = "keywords"
)]
pub async fn delete_keyword(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    server.store.delete_keyword(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
