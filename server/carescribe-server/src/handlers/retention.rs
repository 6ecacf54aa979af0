use axum::{
    extract::{Query, State},
    Json,
};
use retention_engine::{RetentionPolicy, DEFAULT_RETENTION_HOURS, MAX_RETENTION_HOURS};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    server::CareScribeServer,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RetentionPolicyQuery {
    pub hospital_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RetentionPolicyResponse {
    pub hospital_id: Uuid,
    pub retention_hours: u32,
    /// True when no hospital policy is configured and the system default
    /// applies.
    pub is_default: bool,
    pub max_retention_hours: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRetentionPolicyRequest {
    /// Transcript retention window in hours; 0 deletes transcripts
    /// immediately after chart generation.
    pub retention_hours: u32,
}

/// Get a hospital's transcript retention policy
#[utoipa::path(
    get,
    path = "/api/v1/retention-policy",
    params(RetentionPolicyQuery),
    responses(
        (status = 200, description = "Retention policy", body = RetentionPolicyResponse),
        (status = 404, description = "Hospital not found")
    ),
    tag = "retention"
)]
pub async fn get_retention_policy(
    State(server): State<CareScribeServer>,
    Query(query): Query<RetentionPolicyQuery>,
) -> Result<Json<ApiResponse<RetentionPolicyResponse>>, ApiError> {
    server.store.get_hospital(query.hospital_id).await?;

    let policy = server.store.get_retention_policy(query.hospital_id).await;
    let response = match policy {
        Some(policy) => RetentionPolicyResponse {
            hospital_id: query.hospital_id,
            retention_hours: policy.retention_hours,
            is_default: false,
            max_retention_hours: MAX_RETENTION_HOURS,
        },
        None => RetentionPolicyResponse {
            hospital_id: query.hospital_id,
            retention_hours: DEFAULT_RETENTION_HOURS,
            is_default: true,
            max_retention_hours: MAX_RETENTION_HOURS,
        },
    };

    Ok(Json(api_success(response)))
}

/// Set a hospital's transcript retention policy
#[utoipa::path(
    put,
    path = "/api/v1/retention-policy",
    params(RetentionPolicyQuery),
    request_body = UpdateRetentionPolicyRequest,
    responses(
        (status = 200, description = "Retention policy updated", body = RetentionPolicyResponse),
        (status = 400, description = "Window exceeds the maximum"),
        (status = 404, description = "Hospital not found")
    ),
    tag = "retention"
)]
pub async fn update_retention_policy(
    State(server): State<CareScribeServer>,
    Query(query): Query<RetentionPolicyQuery>,
    Json(req): Json<UpdateRetentionPolicyRequest>,
) -> Result<Json<ApiResponse<RetentionPolicyResponse>>, ApiError> {
    server.store.get_hospital(query.hospital_id).await?;

    // Window bound validation lives with the policy type.
    let policy = RetentionPolicy::for_hospital(query.hospital_id, req.retention_hours)?;
    server.store.set_retention_policy(policy).await?;

    Ok(Json(api_success(RetentionPolicyResponse {
        hospital_id: query.hospital_id,
        retention_hours: req.retention_hours,
        is_default: false,
        max_retention_hours: MAX_RETENTION_HOURS,
    })))
}
