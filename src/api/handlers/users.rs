//! Personnel management handlers

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
use crate::domain::{RepositoryProvider, Role, User};

#[derive(Clone)]
pub struct UserState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// A personnel record as exposed by the API.
///
/// The stored password is never serialized.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    /// `ADMIN`, `EMPLOYEE` or `VISITOR`
    pub role: String,
    /// Remaining visitor badge validity; absent on legacy 4-field records
    pub badge_count: Option<i32>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.to_string(),
            badge_count: user.badge_count,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "id": "EMP07",
    "username": "Dana",
    "password": "hunter2",
    "role": "EMPLOYEE"
}))]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// `ADMIN`, `EMPLOYEE` or `VISITOR`
    #[validate(length(min = 1))]
    pub role: String,
}

/// List all personnel
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Configured users, store order", body = ApiResponse<Vec<UserDto>>)
    )
)]
pub async fn list_users(
    State(state): State<UserState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, (StatusCode, Json<ApiResponse<Vec<UserDto>>>)> {
    let users = state.repos.users().list().await.map_err(error_reply)?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// Register a new user
///
/// Appends to the personnel store. New records always start with badge
/// count 0.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User added", body = ApiResponse<UserDto>),
        (status = 400, description = "Missing field or unknown role")
    )
)]
pub async fn create_user(
    State(state): State<UserState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let Some(role) = Role::parse(&request.role) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid role: {}", request.role))),
        ));
    };

    let user = User {
        id: request.id,
        username: request.username,
        password: request.password,
        role,
        badge_count: Some(0),
    };
    state.repos.users().append(&user).await.map_err(error_reply)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(UserDto::from(user)))))
}
