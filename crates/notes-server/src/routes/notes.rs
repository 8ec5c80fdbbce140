//! Note routes.
//!
//! - GET /notes - List every note with its owner (public)
//! - GET /notes/{id} - Read one note with its owner (public)
//! - POST /notes - Create a note owned by the caller
//! - PUT /notes/{id} - Replace title and content (owner only)
//! - DELETE /notes/{id} - Delete (owner only)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    routing::get,
};
use chrono::Utc;
use notes_core::{NewNote, NoteChanges, NoteWithOwner};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, OwnedNote, parse_note_id};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for POST /notes and PUT /notes/{id}.
///
/// Both fields are optional here so that missing ones are reported as
/// validation messages instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notes
async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteWithOwner>>> {
    let notes = state.repository().find_all_notes().await?;
    Ok(Json(notes))
}

/// GET /notes/{id}
async fn get_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<NoteWithOwner>> {
    let note_id = parse_note_id(&raw_id)?;
    let note = state
        .repository()
        .find_note_with_owner(note_id)
        .await?
        .ok_or_else(ApiError::note_not_found)?;
    Ok(Json(note))
}

/// POST /notes
///
/// # Response
///
/// - 201 Created with `Location: /notes/{id}` and no body
/// - 400 Bad Request: `{ "errors": [...] }`
/// - 401 Unauthorized
async fn create_note(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    JsonBody(request): JsonBody<NoteRequest>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1])> {
    let new_note = NewNote::new(request.title, request.content, identity.id)?;
    let note = state.repository().create_note(&new_note).await?;

    tracing::info!(note_id = %note.id, identity_id = %identity.id, "Note created");

    Ok((StatusCode::CREATED, [(header::LOCATION, note.id.location())]))
}

/// PUT /notes/{id}
///
/// # Response
///
/// - 204 No Content
/// - 400 Bad Request: `{ "errors": [...] }`
/// - 401 / 403 / 404 from the guards
async fn update_note(
    State(state): State<AppState>,
    OwnedNote { owner, mut note }: OwnedNote,
    JsonBody(request): JsonBody<NoteRequest>,
) -> ApiResult<StatusCode> {
    NoteChanges::new(request.title, request.content)?.apply_to(&mut note, Utc::now());
    let note = state.repository().update_note(&note).await?;

    tracing::info!(note_id = %note.id, identity_id = %owner.id, "Note updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /notes/{id}
///
/// # Response
///
/// - 204 No Content
/// - 401 / 403 / 404 from the guards
async fn delete_note(
    State(state): State<AppState>,
    OwnedNote { owner, note }: OwnedNote,
) -> ApiResult<StatusCode> {
    state.repository().destroy_note(note.id).await?;

    tracing::info!(note_id = %note.id, identity_id = %owner.id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_request_missing_fields() {
        let request: NoteRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.content.is_none());
    }

    #[test]
    fn test_note_request_ignores_owner_field() {
        let request: NoteRequest =
            serde_json::from_str(r#"{"title": "T", "content": "C", "userId": 99}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("T"));
        assert_eq!(request.content.as_deref(), Some("C"));
    }
}
