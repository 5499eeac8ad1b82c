//! Login check handlers
//!
//! A stateless credential check against the personnel store. No token, no
//! session, no cookie: the simulator has no real authentication, and no
//! other endpoint requires a prior login.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::ApiResponse;
use crate::api::handlers::error_reply;
use crate::api::handlers::users::UserDto;
use crate::domain::{DomainError, LogLevel, RepositoryProvider};

#[derive(Clone)]
pub struct AuthState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"username": "Admin", "password": "admin"}))]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Verify a username/password pair
///
/// Both failure modes are 401 with distinct messages and leave an ERROR
/// line in the audit log; a success leaves an INFO line.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = ApiResponse<UserDto>),
        (status = 401, description = "Unknown user or wrong password")
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await
        .map_err(error_reply)?;

    let Some(user) = user else {
        return Err(failed_login(&state, "User not found").await);
    };

    if user.password != request.password {
        return Err(failed_login(&state, "Incorrect password").await);
    }

    // Best effort: a full log file must not block the login itself.
    if let Err(e) = state
        .repos
        .audit()
        .append(
            LogLevel::Info,
            &format!("Login successful for user: {}", user.label()),
        )
        .await
    {
        tracing::error!("failed to audit login: {e}");
    }

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

async fn failed_login(
    state: &AuthState,
    reason: &'static str,
) -> (StatusCode, Json<ApiResponse<UserDto>>) {
    if let Err(e) = state
        .repos
        .audit()
        .append(LogLevel::Error, &format!("Failed login attempt: {reason}"))
        .await
    {
        tracing::error!("failed to audit login attempt: {e}");
    }
    error_reply(DomainError::InvalidCredentials(reason))
}
