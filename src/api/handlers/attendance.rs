//! Attendance handlers

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
use crate::domain::{
    AttendanceAction, AttendanceRecord, DomainError, LogLevel, RepositoryProvider, Role,
};
use crate::infrastructure::storage::now_stamp;

#[derive(Clone)]
pub struct AttendanceState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDto {
    pub timestamp: String,
    pub user_id: String,
    pub username: String,
    /// `CHECK_IN` or `CHECK_OUT`
    pub action: String,
}

impl From<AttendanceRecord> for AttendanceDto {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            user_id: record.user_id,
            username: record.username,
            action: record.action.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"userId": "EMP07", "action": "CHECK_IN"}))]
pub struct RecordAttendanceRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    /// `CHECK_IN` or `CHECK_OUT`
    #[validate(length(min = 1))]
    pub action: String,
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    responses(
        (status = 200, description = "Attendance records, store order", body = ApiResponse<Vec<AttendanceDto>>)
    )
)]
pub async fn list_attendance(
    State(state): State<AttendanceState>,
) -> Result<Json<ApiResponse<Vec<AttendanceDto>>>, (StatusCode, Json<ApiResponse<Vec<AttendanceDto>>>)>
{
    let records = state.repos.attendance().list().await.map_err(error_reply)?;
    Ok(Json(ApiResponse::success(
        records.into_iter().map(AttendanceDto::from).collect(),
    )))
}

/// Record a check-in or check-out
///
/// Employees only; other roles get 403.
#[utoipa::path(
    post,
    path = "/api/attendance",
    tag = "Attendance",
    request_body = RecordAttendanceRequest,
    responses(
        (status = 201, description = "Recorded", body = ApiResponse<AttendanceDto>),
        (status = 400, description = "Missing field or unknown action"),
        (status = 403, description = "User is not an employee"),
        (status = 404, description = "User not found")
    )
)]
pub async fn record_attendance(
    State(state): State<AttendanceState>,
    ValidatedJson(request): ValidatedJson<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AttendanceDto>>), (StatusCode, Json<ApiResponse<AttendanceDto>>)>
{
    let Some(action) = AttendanceAction::parse(&request.action) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Invalid attendance action: {}",
                request.action
            ))),
        ));
    };

    let user = state
        .repos
        .users()
        .find_by_id(&request.user_id)
        .await
        .map_err(error_reply)?
        .ok_or_else(|| {
            error_reply(DomainError::UserNotFound {
                id: request.user_id.clone(),
            })
        })?;

    if user.role != Role::Employee {
        return Err(error_reply(DomainError::Forbidden(
            "Only employees can check in or out".to_string(),
        )));
    }

    let record = AttendanceRecord {
        timestamp: now_stamp(),
        user_id: user.id.clone(),
        username: user.username.clone(),
        action,
    };
    state
        .repos
        .attendance()
        .append(&record)
        .await
        .map_err(error_reply)?;

    let verb = match action {
        AttendanceAction::CheckIn => "checked in",
        AttendanceAction::CheckOut => "checked out",
    };
    state
        .repos
        .audit()
        .append(LogLevel::Info, &format!("Employee {verb}: {}", user.label()))
        .await
        .map_err(error_reply)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(AttendanceDto::from(record)))))
}
