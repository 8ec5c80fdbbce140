//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They convert into the domain types in notes-core.

use chrono::{DateTime, Utc};
use notes_core::{Identity, IdentityId, Note, NoteId, NoteWithOwner, PublicIdentity};
use sqlx::FromRow;

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub email_address: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for Identity {
    fn from(row: UserRow) -> Self {
        Identity {
            id: IdentityId(row.id),
            user_name: row.user_name,
            email_address: row.email_address,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: NoteId(row.id),
            title: row.title,
            content: row.content,
            user_id: IdentityId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A note joined with its owner's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct NoteWithOwnerRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner_id: i64,
    pub owner_user_name: String,
    pub owner_email_address: String,
}

impl From<NoteWithOwnerRow> for NoteWithOwner {
    fn from(row: NoteWithOwnerRow) -> Self {
        NoteWithOwner {
            id: NoteId(row.id),
            title: row.title,
            content: row.content,
            user: PublicIdentity {
                id: IdentityId(row.owner_id),
                user_name: row.owner_user_name,
                email_address: row.owner_email_address,
            },
        }
    }
}
