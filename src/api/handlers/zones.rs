//! Zone management handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::ApiResponse;
use crate::api::handlers::error_reply;
use crate::domain::{RepositoryProvider, Zone, ZoneStatus};

#[derive(Clone)]
pub struct ZoneState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneDto {
    pub name: String,
    /// `LOCKED`, `UNLOCKED`, `RESTRICTED`, or `UNKNOWN` for a row whose
    /// status field did not survive
    pub status: String,
}

impl From<Zone> for ZoneDto {
    fn from(zone: Zone) -> Self {
        Self {
            name: zone.name,
            status: zone.status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"name": "LAB", "status": "LOCKED"}))]
pub struct UpsertZoneRequest {
    #[validate(length(min = 1))]
    pub name: String,
    /// `LOCKED`, `UNLOCKED` or `RESTRICTED`
    #[validate(length(min = 1))]
    pub status: String,
}

/// List all zones
#[utoipa::path(
    get,
    path = "/api/zones",
    tag = "Zones",
    responses(
        (status = 200, description = "Configured zones, store order", body = ApiResponse<Vec<ZoneDto>>)
    )
)]
pub async fn list_zones(
    State(state): State<ZoneState>,
) -> Result<Json<ApiResponse<Vec<ZoneDto>>>, (StatusCode, Json<ApiResponse<Vec<ZoneDto>>>)> {
    let zones = state.repos.zones().list().await.map_err(error_reply)?;
    Ok(Json(ApiResponse::success(
        zones.into_iter().map(ZoneDto::from).collect(),
    )))
}

/// Create or update a zone
///
/// Upserts by name: an existing row is rewritten in place, a new name is
/// appended. The store never ends up with two rows for one name.
#[utoipa::path(
    post,
    path = "/api/zones",
    tag = "Zones",
    request_body = UpsertZoneRequest,
    responses(
        (status = 200, description = "Zone stored", body = ApiResponse<ZoneDto>),
        (status = 400, description = "Missing field or unknown status")
    )
)]
pub async fn upsert_zone(
    State(state): State<ZoneState>,
    ValidatedJson(request): ValidatedJson<UpsertZoneRequest>,
) -> Result<Json<ApiResponse<ZoneDto>>, (StatusCode, Json<ApiResponse<ZoneDto>>)> {
    let Some(status) = ZoneStatus::parse(&request.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Invalid zone status: {}",
                request.status
            ))),
        ));
    };

    let zone = Zone {
        name: request.name,
        status,
    };
    state.repos.zones().upsert(&zone).await.map_err(error_reply)?;

    Ok(Json(ApiResponse::success(ZoneDto::from(zone))))
}
