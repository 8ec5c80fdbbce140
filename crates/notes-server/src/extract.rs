//! Request extractors: the note ownership guard and JSON bodies.
//!
//! Guards run in handler-argument order. A note mutation handler takes
//! [`OwnedNote`], which first runs the credential guard, then loads the
//! note named in the path and checks its owner. The first failing guard
//! short-circuits the request; the handler body never runs.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use notes_core::{Identity, Note, NoteId, ValidationErrors};
use notes_store::Repository;
use serde::de::DeserializeOwned;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult, NOT_NOTE_OWNER};
use crate::state::AppState;

/// Parse a path segment as a note id.
///
/// Anything that is not an integer cannot name a note, so it is reported
/// as not found rather than as a bad request.
pub fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    raw.parse().map_err(|_| ApiError::note_not_found())
}

/// Load note `note_id` and confirm `identity` owns it.
pub async fn verify_owner(
    repository: &dyn Repository,
    identity: &Identity,
    note_id: NoteId,
) -> ApiResult<Note> {
    let note = repository
        .find_note_by_id(note_id)
        .await?
        .ok_or_else(ApiError::note_not_found)?;

    if !note.is_owned_by(identity.id) {
        tracing::warn!(
            note_id = %note.id,
            owner_id = %note.user_id,
            identity_id = %identity.id,
            "Ownership check failed"
        );
        return Err(ApiError::Forbidden(NOT_NOTE_OWNER.to_string()));
    }

    Ok(note)
}

/// A note the authenticated caller owns, with the caller's identity.
#[derive(Debug, Clone)]
pub struct OwnedNote {
    pub owner: Identity,
    pub note: Note,
}

impl FromRequestParts<AppState> for OwnedNote {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(owner) = CurrentUser::from_request_parts(parts, state).await?;

        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::note_not_found())?;
        let note_id = parse_note_id(&raw_id)?;

        let note = verify_owner(state.repository(), &owner, note_id).await?;
        parts.extensions.insert(note.clone());

        Ok(OwnedNote { owner, note })
    }
}

/// `Json<T>` whose rejections are reported as validation failures.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "Rejected JSON body");
    ApiError::Validation(ValidationErrors::single(rejection.body_text()))
}
