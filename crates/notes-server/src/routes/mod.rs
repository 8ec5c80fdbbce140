//! Route definitions for the HTTP API.

pub mod health;
pub mod notes;
pub mod users;

use axum::{Router, middleware};

use crate::middleware::error_details::redact_internal_errors;
use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(notes::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redact_internal_errors,
        ))
        .with_state(state)
}
