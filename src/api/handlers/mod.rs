//! REST API handlers

pub mod access;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod logs;
pub mod stats;
pub mod users;
pub mod zones;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// Map a domain error onto a `(status, envelope)` reply.
///
/// I/O failures are logged server-side and answered with a generic body.
pub(crate) fn error_reply<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("storage failure: {err}");
        return (status, Json(ApiResponse::error("Internal storage error")));
    }
    (status, Json(ApiResponse::error(err.to_string())))
}
