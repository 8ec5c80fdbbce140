//! In-process implementation of the persistence port.
//!
//! Mirrors the PostgreSQL schema's guarantees: sequential ids starting at
//! 1, unique user names and email addresses, and notes that must point at
//! an existing identity. State is lost when the process exits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use notes_core::{
    Identity, IdentityId, NewIdentity, NewNote, Note, NoteId, NoteWithOwner, ValidationErrors,
    messages,
};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repository::Repository;

#[derive(Debug, Default)]
struct Tables {
    identities: BTreeMap<IdentityId, Identity>,
    notes: BTreeMap<NoteId, Note>,
    last_identity_id: i64,
    last_note_id: i64,
}

impl Tables {
    fn with_owner(&self, note: &Note) -> Option<NoteWithOwner> {
        let owner = self.identities.get(&note.user_id)?;
        Some(NoteWithOwner {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            user: owner.public(),
        })
    }
}

/// Memory-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_identity_by_user_name(&self, user_name: &str) -> StoreResult<Option<Identity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .identities
            .values()
            .find(|identity| identity.user_name == user_name)
            .cloned())
    }

    async fn find_identity_by_id(&self, id: IdentityId) -> StoreResult<Option<Identity>> {
        Ok(self.tables.read().await.identities.get(&id).cloned())
    }

    async fn create_identity(&self, identity: &NewIdentity) -> StoreResult<Identity> {
        let mut tables = self.tables.write().await;

        let mut errors = ValidationErrors::default();
        if tables
            .identities
            .values()
            .any(|existing| existing.user_name == identity.user_name)
        {
            errors.push(messages::USER_NAME_TAKEN);
        }
        if tables
            .identities
            .values()
            .any(|existing| existing.email_address == identity.email_address)
        {
            errors.push(messages::EMAIL_TAKEN);
        }
        errors.into_result()?;

        tables.last_identity_id += 1;
        let now = Utc::now();
        let created = Identity {
            id: IdentityId(tables.last_identity_id),
            user_name: identity.user_name.clone(),
            email_address: identity.email_address.clone(),
            password_hash: identity.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.identities.insert(created.id, created.clone());

        tracing::debug!(identity_id = %created.id, "Inserted identity");
        Ok(created)
    }

    async fn find_note_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn find_note_with_owner(&self, id: NoteId) -> StoreResult<Option<NoteWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables.notes.get(&id).and_then(|note| tables.with_owner(note)))
    }

    async fn find_all_notes(&self) -> StoreResult<Vec<NoteWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .filter_map(|note| tables.with_owner(note))
            .collect())
    }

    async fn create_note(&self, note: &NewNote) -> StoreResult<Note> {
        let mut tables = self.tables.write().await;
        if !tables.identities.contains_key(&note.user_id) {
            return Err(StoreError::IdentityNotFound(note.user_id));
        }

        tables.last_note_id += 1;
        let now = Utc::now();
        let created = Note {
            id: NoteId(tables.last_note_id),
            title: note.title.clone(),
            content: note.content.clone(),
            user_id: note.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.notes.insert(created.id, created.clone());

        tracing::debug!(note_id = %created.id, "Inserted note");
        Ok(created)
    }

    async fn update_note(&self, note: &Note) -> StoreResult<Note> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .notes
            .get_mut(&note.id)
            .ok_or(StoreError::NoteNotFound(note.id))?;

        stored.title = note.title.clone();
        stored.content = note.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn destroy_note(&self, id: NoteId) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NoteNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_identity(name: &str) -> NewIdentity {
        NewIdentity {
            user_name: name.to_string(),
            email_address: format!("{name}@x.com"),
            password_hash: "hash".to_string(),
        }
    }

    fn new_note(owner: IdentityId, title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "content".to_string(),
            user_id: owner,
        }
    }

    #[tokio::test]
    async fn test_identity_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store.create_identity(&new_identity("alice")).await.unwrap();
        let b = store.create_identity(&new_identity("bob")).await.unwrap();
        assert_eq!(a.id, IdentityId(1));
        assert_eq!(b.id, IdentityId(2));
    }

    #[tokio::test]
    async fn test_identity_lookup_by_user_name() {
        let store = MemoryStore::new();
        let alice = store.create_identity(&new_identity("alice")).await.unwrap();

        let found = store.find_identity_by_user_name("alice").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(alice.id));
        assert!(store.find_identity_by_user_name("Alice").await.unwrap().is_none());
        assert!(store.find_identity_by_id(IdentityId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_identity_reports_both_fields() {
        let store = MemoryStore::new();
        store.create_identity(&new_identity("alice")).await.unwrap();

        let err = store.create_identity(&new_identity("alice")).await.unwrap_err();
        assert_eq!(
            err.validation_messages().unwrap(),
            &[messages::USER_NAME_TAKEN, messages::EMAIL_TAKEN]
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_only() {
        let store = MemoryStore::new();
        store.create_identity(&new_identity("alice")).await.unwrap();

        let mut other = new_identity("carol");
        other.email_address = "alice@x.com".to_string();
        let err = store.create_identity(&other).await.unwrap_err();
        assert_eq!(err.validation_messages().unwrap(), &[messages::EMAIL_TAKEN]);
    }

    #[tokio::test]
    async fn test_note_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = store
            .create_note(&new_note(IdentityId(7), "T"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IdentityNotFound(IdentityId(7))));
        assert!(store.find_all_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let store = MemoryStore::new();
        let alice = store.create_identity(&new_identity("alice")).await.unwrap();

        let mut note = store.create_note(&new_note(alice.id, "first")).await.unwrap();
        assert_eq!(note.id, NoteId(1));

        let view = store.find_note_with_owner(note.id).await.unwrap().unwrap();
        assert_eq!(view.title, "first");
        assert_eq!(view.user.user_name, "alice");

        note.title = "renamed".to_string();
        let updated = store.update_note(&note).await.unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.user_id, alice.id);
        assert!(updated.updated_at >= updated.created_at);

        store.destroy_note(note.id).await.unwrap();
        assert!(store.find_note_by_id(note.id).await.unwrap().is_none());
        assert!(matches!(
            store.destroy_note(note.id).await,
            Err(StoreError::NoteNotFound(_))
        ));
        assert!(matches!(
            store.update_note(&note).await,
            Err(StoreError::NoteNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_all_notes_ordered_by_id() {
        let store = MemoryStore::new();
        let alice = store.create_identity(&new_identity("alice")).await.unwrap();
        let bob = store.create_identity(&new_identity("bob")).await.unwrap();

        store.create_note(&new_note(bob.id, "b")).await.unwrap();
        store.create_note(&new_note(alice.id, "a")).await.unwrap();

        let all = store.find_all_notes().await.unwrap();
        let titles: Vec<_> = all.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["b", "a"]);
        assert_eq!(all[0].user.id, bob.id);
    }
}
