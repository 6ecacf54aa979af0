use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use dashboard_engine::{compute_stats, DashboardStats};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    server::CareScribeServer,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatsQuery {
    pub hospital_id: Uuid,
}

/// Aggregated dashboard statistics for one hospital
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 404, description = "Hospital not found")
    ),
    tag = "dashboard"
)]
pub async fn get_stats(
    State(server): State<CareScribeServer>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    server.store.get_hospital(query.hospital_id).await?;

    // Visit summaries are cloned out of the read guard; the aggregation
    // itself runs without holding any store lock.
    let visits = server.store.visit_records(query.hospital_id).await;
    let stats = compute_stats(&visits, Utc::now(), &server.stats_config());

    Ok(Json(api_success(stats)))
}
