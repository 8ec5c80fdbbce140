//! The persistence port.
//!
//! HTTP handlers and guards only ever see `dyn Repository`, so any backend
//! (PostgreSQL in production, [`MemoryStore`](crate::MemoryStore) in tests)
//! can be injected through application state.
//!
//! Lookups return `Ok(None)` for a missing record; only mutations of a
//! record that must exist return the `*NotFound` errors. Field and
//! uniqueness problems come back as [`StoreError::Validation`].
//!
//! [`StoreError::Validation`]: crate::StoreError::Validation

use async_trait::async_trait;
use notes_core::{Identity, IdentityId, NewIdentity, NewNote, Note, NoteId, NoteWithOwner};

use crate::error::StoreResult;

/// Capability set for identities and notes.
#[async_trait]
pub trait Repository: Send + Sync + std::fmt::Debug {
    /// Check the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    // ==================== Identity Operations ====================

    /// Find an identity by its user name (exact match).
    async fn find_identity_by_user_name(&self, user_name: &str) -> StoreResult<Option<Identity>>;

    /// Find an identity by id.
    async fn find_identity_by_id(&self, id: IdentityId) -> StoreResult<Option<Identity>>;

    /// Insert an identity. User name and email address must be unused.
    async fn create_identity(&self, identity: &NewIdentity) -> StoreResult<Identity>;

    // ==================== Note Operations ====================

    /// Find a note by id.
    async fn find_note_by_id(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// Find a note by id, joined with its owner's public attributes.
    async fn find_note_with_owner(&self, id: NoteId) -> StoreResult<Option<NoteWithOwner>>;

    /// All notes with their owners, ordered by id.
    async fn find_all_notes(&self) -> StoreResult<Vec<NoteWithOwner>>;

    /// Insert a note. The owner must exist.
    async fn create_note(&self, note: &NewNote) -> StoreResult<Note>;

    /// Persist the title and content of `note`, bumping `updated_at`.
    async fn update_note(&self, note: &Note) -> StoreResult<Note>;

    /// Delete a note.
    async fn destroy_note(&self, id: NoteId) -> StoreResult<()>;
}
