//! Access check handler, the badge-swipe endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::application::AccessService;
use crate::domain::DomainError;

#[derive(Clone)]
pub struct AccessState {
    pub access: Arc<AccessService>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"userId": "EMP07", "zone": "LAB"}))]
pub struct AccessRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub zone: String,
}

/// Decision payload.
///
/// Unlike the other endpoints this one answers with the decision itself,
/// not the response envelope; `role` and `zone` are omitted when the user
/// was never identified.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponse {
    pub granted: bool,
    /// `Access Granted`, `Access Denied: <reason>` or `User not found`
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Simulate a badge swipe
///
/// Runs the access rules and appends the outcome to the audit log. An
/// unknown user is 404 and is NOT logged.
#[utoipa::path(
    post,
    path = "/api/access",
    tag = "Access",
    request_body = AccessRequest,
    responses(
        (status = 200, description = "Decision made (granted or denied)", body = AccessResponse),
        (status = 404, description = "User not found", body = AccessResponse)
    )
)]
pub async fn check_access(
    State(state): State<AccessState>,
    ValidatedJson(request): ValidatedJson<AccessRequest>,
) -> Result<Json<AccessResponse>, (StatusCode, Json<AccessResponse>)> {
    match state.access.decide(&request.user_id, &request.zone).await {
        Ok(decision) => Ok(Json(AccessResponse {
            granted: decision.granted,
            message: decision.message,
            role: Some(decision.role.to_string()),
            zone: Some(decision.zone),
        })),
        Err(DomainError::UserNotFound { id }) => {
            tracing::debug!("access check for unknown user {id}");
            Err((
                StatusCode::NOT_FOUND,
                Json(AccessResponse {
                    granted: false,
                    message: "User not found".to_string(),
                    role: None,
                    zone: None,
                }),
            ))
        }
        Err(e) => {
            tracing::error!("access check failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AccessResponse {
                    granted: false,
                    message: "Internal storage error".to_string(),
                    role: None,
                    zone: None,
                }),
            ))
        }
    }
}
