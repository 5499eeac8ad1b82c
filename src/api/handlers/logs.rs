//! Audit log handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::ApiResponse;
use crate::api::handlers::error_reply;
use crate::domain::{LogEntry, LogLevel, RepositoryProvider};

#[derive(Clone)]
pub struct LogState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogEntryDto {
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// `INFO`, `WARN` or `ERROR`
    pub level: String,
    pub message: String,
}

impl From<LogEntry> for LogEntryDto {
    fn from(entry: LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            level: entry.level.to_string(),
            message: entry.message,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListLogsParams {
    /// Keep only entries whose message contains this substring
    /// (used by the dashboard to filter by user)
    pub user: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"level": "WARN", "message": "manual lockdown drill"}))]
pub struct AppendLogRequest {
    /// `INFO`, `WARN` or `ERROR`
    #[validate(length(min = 1))]
    pub level: String,
    #[validate(length(min = 1))]
    pub message: String,
}

/// List audit log entries
///
/// Most recent first. Malformed stored lines are skipped silently.
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Logs",
    params(ListLogsParams),
    responses(
        (status = 200, description = "Parsed log entries, newest first", body = ApiResponse<Vec<LogEntryDto>>)
    )
)]
pub async fn list_logs(
    State(state): State<LogState>,
    Query(params): Query<ListLogsParams>,
) -> Result<Json<ApiResponse<Vec<LogEntryDto>>>, (StatusCode, Json<ApiResponse<Vec<LogEntryDto>>>)>
{
    let entries = state.repos.audit().entries().await.map_err(error_reply)?;
    let entries: Vec<LogEntryDto> = entries
        .into_iter()
        .filter(|entry| match &params.user {
            Some(needle) => entry.message.contains(needle),
            None => true,
        })
        .map(LogEntryDto::from)
        .collect();
    Ok(Json(ApiResponse::success(entries)))
}

/// Append an audit log entry
#[utoipa::path(
    post,
    path = "/api/logs",
    tag = "Logs",
    request_body = AppendLogRequest,
    responses(
        (status = 200, description = "Entry appended"),
        (status = 400, description = "Missing field or unknown level")
    )
)]
pub async fn append_log(
    State(state): State<LogState>,
    ValidatedJson(request): ValidatedJson<AppendLogRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(level) = LogLevel::parse(&request.level) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid log level: {}", request.level))),
        ));
    };
    state
        .repos
        .audit()
        .append(level, &request.message)
        .await
        .map_err(error_reply)?;
    Ok(Json(ApiResponse::success(())))
}
