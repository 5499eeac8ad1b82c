//! Dashboard stats handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::error_reply;
use crate::application::{DashboardStats, StatsService};

#[derive(Clone)]
pub struct StatsState {
    pub stats: Arc<StatsService>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    /// Total configured users
    pub active_users: usize,
    /// Users whose latest attendance record is a check-in
    pub on_campus: usize,
    /// `LOW`, `MODERATE` or `CRITICAL`
    pub security_level: String,
    /// `DEFCON 5` / `DEFCON 3` / `DEFCON 1`
    pub defcon: String,
    /// Mock load figure, random in [10, 40)
    pub load: u32,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            active_users: stats.active_users,
            on_campus: stats.on_campus,
            security_level: stats.security_level.to_string(),
            defcon: stats.defcon.to_string(),
            load: stats.load,
        }
    }
}

/// Dashboard header values
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Current dashboard snapshot", body = ApiResponse<DashboardStatsDto>)
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<StatsState>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, (StatusCode, Json<ApiResponse<DashboardStatsDto>>)>
{
    let stats = state.stats.snapshot().await.map_err(error_reply)?;
    Ok(Json(ApiResponse::success(DashboardStatsDto::from(stats))))
}
