//! notes-core: domain types for the notes API
//!
//! This crate provides:
//! - Identity and note records as stored by the persistence layer
//! - Public views that never carry a password hash
//! - Field validation producing user-facing messages
//!
//! It performs no I/O; storage lives in `notes-store` and HTTP in
//! `notes-server`.

pub mod identity;
pub mod types;
pub mod validation;

pub use identity::{Identity, IdentityProfile, NewIdentity, PublicIdentity, RegisterIdentity};
pub use types::{IdentityId, NewNote, Note, NoteChanges, NoteId, NoteWithOwner};
pub use validation::{ValidationErrors, messages};
