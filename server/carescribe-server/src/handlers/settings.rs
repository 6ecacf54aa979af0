use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    server::CareScribeServer,
    validate_length, validate_required,
    validation::RequestValidation,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SettingsQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub specialty: String,
    /// Preferred AI note style; the service default applies when unset.
    pub ai_style: Option<String>,
    pub notify_chart_ready: bool,
    pub notify_product_updates: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub ai_style: Option<String>,
    pub notify_chart_ready: Option<bool>,
    pub notify_product_updates: Option<bool>,
}

impl RequestValidation for UpdateSettingsRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref display_name) = self.display_name {
            validate_required!(display_name, "Display name cannot be blank");
            validate_length!(
                display_name,
                1,
                100,
                "Display name must be between 1 and 100 characters"
            );
        }
        if let Some(ref specialty) = self.specialty {
            validate_required!(specialty, "Specialty cannot be blank");
        }
        Ok(())
    }
}

/// Get a clinician's settings
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    params(SettingsQuery),
    responses(
        (status = 200, description = "Settings retrieved successfully", body = SettingsResponse),
        (status = 404, description = "User not found")
    ),
    tag = "settings"
)]
pub async fn get_settings(
    State(server): State<CareScribeServer>,
    Query(query): Query<SettingsQuery>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let user = server.store.get_user(query.user_id).await?;
    Ok(Json(api_success(SettingsResponse {
        user_id: user.id,
        display_name: user.display_name,
        specialty: user.specialty,
        ai_style: user.ai_style,
        notify_chart_ready: user.notify_chart_ready,
        notify_product_updates: user.notify_product_updates,
    })))
}

/// Update a clinician's settings
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    params(SettingsQuery),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = SettingsResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found")
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(server): State<CareScribeServer>,
    Query(query): Query<SettingsQuery>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    req.validate()?;

    let user = server
        .store
        .update_user(query.user_id, |user| {
            if let Some(display_name) = req.display_name {
                user.display_name = display_name;
            }
            if let Some(specialty) = req.specialty {
                user.specialty = specialty;
            }
            if let Some(ai_style) = req.ai_style {
                user.ai_style = Some(ai_style);
            }
            if let Some(notify_chart_ready) = req.notify_chart_ready {
                user.notify_chart_ready = notify_chart_ready;
            }
            if let Some(notify_product_updates) = req.notify_product_updates {
                user.notify_product_updates = notify_product_updates;
            }
        })
        .await?;

    Ok(Json(api_success(SettingsResponse {
        user_id: user.id,
        display_name: user.display_name,
        specialty: user.specialty,
        ai_style: user.ai_style,
        notify_chart_ready: user.notify_chart_ready,
        notify_product_updates: user.notify_product_updates,
    })))
}
