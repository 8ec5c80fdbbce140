//! Core data types for notes.
//!
//! A note is a titled piece of text owned by exactly one identity. The
//! owner is fixed at creation; only title and content change afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::identity::PublicIdentity;
use crate::validation::{ValidationErrors, messages, require};

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a registered identity.
///
/// Wraps the database-assigned integer key so identity ids cannot be
/// confused with note ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(pub i64);

impl IdentityId {
    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Path of this note's resource, used for the `Location` header.
    #[must_use]
    pub fn location(self) -> String {
        format!("/notes/{}", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

// ============================================================================
// Note
// ============================================================================

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Identity that created the note.
    pub user_id: IdentityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether `identity` owns this note.
    #[must_use]
    pub fn is_owned_by(&self, identity: IdentityId) -> bool {
        self.user_id == identity
    }
}

/// A note together with its owner's public attributes.
///
/// This is the shape returned by the note read endpoints; the owner is
/// keyed `User` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithOwner {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(rename = "User")]
    pub user: PublicIdentity,
}

/// Validated input for inserting a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user_id: IdentityId,
}

impl NewNote {
    /// Build a note owned by `owner` from possibly-missing request fields.
    ///
    /// Every failing field is reported, not just the first.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        owner: IdentityId,
    ) -> Result<Self, ValidationErrors> {
        let changes = NoteChanges::new(title, content)?;
        Ok(Self {
            title: changes.title,
            content: changes.content,
            user_id: owner,
        })
    }
}

/// Validated replacement title and content for an existing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: String,
    pub content: String,
}

impl NoteChanges {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = require(title, messages::TITLE_REQUIRED, &mut errors);
        let content = require(content, messages::CONTENT_REQUIRED, &mut errors);

        match (title, content) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(errors),
        }
    }

    /// Apply the changes to `note`, leaving id, owner and creation time alone.
    pub fn apply_to(self, note: &mut Note, now: DateTime<Utc>) {
        note.title = self.title;
        note.content = self.content;
        note.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note(owner: i64) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId(7),
            title: "T".to_string(),
            content: "C".to_string(),
            user_id: IdentityId(owner),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_note_id_parse() {
        assert_eq!("42".parse::<NoteId>().unwrap(), NoteId(42));
        assert!("abc".parse::<NoteId>().is_err());
        assert!("".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_note_id_location() {
        assert_eq!(NoteId(3).location(), "/notes/3");
    }

    #[test]
    fn test_is_owned_by() {
        let note = sample_note(1);
        assert!(note.is_owned_by(IdentityId(1)));
        assert!(!note.is_owned_by(IdentityId(2)));
    }

    #[test]
    fn test_new_note_reports_every_missing_field() {
        let err = NewNote::new(None, Some("  ".to_string()), IdentityId(1)).unwrap_err();
        assert_eq!(
            err.messages(),
            &[messages::TITLE_REQUIRED, messages::CONTENT_REQUIRED]
        );
    }

    #[test]
    fn test_new_note_valid() {
        let note = NewNote::new(Some("T".into()), Some("C".into()), IdentityId(9)).unwrap();
        assert_eq!(note.title, "T");
        assert_eq!(note.user_id, IdentityId(9));
    }

    #[test]
    fn test_changes_apply_keeps_owner() {
        let mut note = sample_note(1);
        let created = note.created_at;
        let later = created + chrono::Duration::seconds(5);
        NoteChanges::new(Some("New".into()), Some("Body".into()))
            .unwrap()
            .apply_to(&mut note, later);

        assert_eq!(note.title, "New");
        assert_eq!(note.content, "Body");
        assert_eq!(note.user_id, IdentityId(1));
        assert_eq!(note.created_at, created);
        assert_eq!(note.updated_at, later);
    }

    #[test]
    fn test_note_with_owner_wire_shape() {
        let view = NoteWithOwner {
            id: NoteId(1),
            title: "T".into(),
            content: "C".into(),
            user: PublicIdentity {
                id: IdentityId(2),
                user_name: "alice".into(),
                email_address: "a@x.com".into(),
            },
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["User"]["userName"], "alice");
        assert_eq!(json["User"]["emailAddress"], "a@x.com");
        assert!(json["User"].get("password").is_none());
        assert!(json["User"].get("passwordHash").is_none());
    }
}
