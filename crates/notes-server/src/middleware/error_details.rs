//! Hides internal error text from clients unless configured otherwise.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{INTERNAL_ERROR, MessageResponse};
use crate::state::AppState;

/// Replace the body of a 500 response with a generic message when
/// `expose_error_details` is off. The underlying error has already been
/// logged by [`ApiError`](crate::error::ApiError).
pub async fn redact_internal_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if state.config().expose_error_details
        || response.status() != StatusCode::INTERNAL_SERVER_ERROR
    {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = Json(MessageResponse {
        message: INTERNAL_ERROR.to_string(),
    });
    (parts, body).into_response()
}
