//! User routes: registration and the current user's profile.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    routing::get,
};
use notes_core::{IdentityProfile, RegisterIdentity};
use serde::Deserialize;

use crate::auth::{self, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body for POST /user.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// GET /user
///
/// The authenticated identity, reloaded from the store, without its
/// password hash.
async fn current_user(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<Json<IdentityProfile>> {
    let stored = state
        .repository()
        .find_identity_by_id(identity.id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No users found".to_string()))?;

    Ok(Json(stored.profile()))
}

/// POST /user
///
/// # Response
///
/// - 201 Created with `Location: /` and no body
/// - 400 Bad Request: `{ "errors": [...] }` for missing fields, a bad
///   email address, or a taken user name / email address
async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, [(header::HeaderName, &'static str); 1])> {
    let registration =
        RegisterIdentity::new(request.user_name, request.email_address, request.password)?;
    let password_hash = auth::hash_password(&registration.password)?;
    let identity = state
        .repository()
        .create_identity(&registration.with_hash(password_hash))
        .await?;

    tracing::info!(identity_id = %identity.id, user_name = %identity.user_name, "Identity registered");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}

/// Build user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/user", get(current_user).post(register))
}
