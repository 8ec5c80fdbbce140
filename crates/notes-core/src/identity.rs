//! Registered identities (user accounts).
//!
//! An [`Identity`] carries the stored password hash and therefore never
//! derives `Serialize`. Everything that leaves the process goes through
//! [`PublicIdentity`] or [`IdentityProfile`].
//!
//! Registration is two-step: [`RegisterIdentity`] validates the raw
//! request fields, then the caller hashes the password and produces a
//! [`NewIdentity`] for the store. Uniqueness of user name and email is
//! enforced by the store, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::IdentityId;
use crate::validation::{ValidationErrors, is_valid_email, messages, require};

/// A stored identity, including its password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub user_name: String,
    pub email_address: String,
    /// PHC-format password hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn public(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id,
            user_name: self.user_name.clone(),
            email_address: self.email_address.clone(),
        }
    }

    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            id: self.id,
            user_name: self.user_name.clone(),
            email_address: self.email_address.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email_address", &self.email_address)
            .finish_non_exhaustive()
    }
}

/// Owner attributes embedded in note responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIdentity {
    pub id: IdentityId,
    pub user_name: String,
    pub email_address: String,
}

/// Response body for `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    pub id: IdentityId,
    pub user_name: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration fields, password still in clear text.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterIdentity {
    pub user_name: String,
    pub email_address: String,
    pub password: String,
}

impl RegisterIdentity {
    /// Validate raw registration fields, reporting every failure.
    pub fn new(
        user_name: Option<String>,
        email_address: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let user_name = require(user_name, messages::USER_NAME_REQUIRED, &mut errors)
            .map(|name| name.trim().to_string());
        // Basic credentials split at the first ':'.
        if let Some(name) = &user_name
            && name.contains(':')
        {
            errors.push(messages::USER_NAME_INVALID);
        }
        let email_address = require(email_address, messages::EMAIL_REQUIRED, &mut errors)
            .map(|email| email.trim().to_string());
        if let Some(email) = &email_address {
            if !is_valid_email(email) {
                errors.push(messages::EMAIL_INVALID);
            }
        }
        let password = require(password, messages::PASSWORD_REQUIRED, &mut errors);

        match (user_name, email_address, password) {
            (Some(user_name), Some(email_address), Some(password)) if errors.is_empty() => {
                Ok(Self {
                    user_name,
                    email_address,
                    password,
                })
            }
            _ => Err(errors),
        }
    }

    /// Swap the clear-text password for its hash.
    pub fn with_hash(self, password_hash: String) -> NewIdentity {
        NewIdentity {
            user_name: self.user_name,
            email_address: self.email_address,
            password_hash,
        }
    }
}

impl std::fmt::Debug for RegisterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterIdentity")
            .field("user_name", &self.user_name)
            .field("email_address", &self.email_address)
            .finish_non_exhaustive()
    }
}

/// Input for inserting an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub user_name: String,
    pub email_address: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_identity() -> Identity {
        let now = Utc::now();
        Identity {
            id: IdentityId(1),
            user_name: "alice".into(),
            email_address: "a@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_register_valid() {
        let reg = RegisterIdentity::new(
            Some(" alice ".into()),
            Some("a@x.com".into()),
            Some("secret1".into()),
        )
        .unwrap();
        assert_eq!(reg.user_name, "alice");
        assert_eq!(reg.password, "secret1");

        let new = reg.with_hash("hash".into());
        assert_eq!(new.password_hash, "hash");
        assert_eq!(new.email_address, "a@x.com");
    }

    #[test]
    fn test_register_collects_all_errors() {
        let err = RegisterIdentity::new(None, Some("nope".into()), Some("".into())).unwrap_err();
        assert_eq!(
            err.messages(),
            &[
                messages::USER_NAME_REQUIRED,
                messages::EMAIL_INVALID,
                messages::PASSWORD_REQUIRED,
            ]
        );
    }

    #[test]
    fn test_register_rejects_colon_in_user_name() {
        let err = RegisterIdentity::new(
            Some("a:b".into()),
            Some("ab@x.com".into()),
            Some("pw".into()),
        )
        .unwrap_err();
        assert_eq!(err.messages(), &[messages::USER_NAME_INVALID]);
    }

    #[test]
    fn test_register_invalid_email_only() {
        let err = RegisterIdentity::new(Some("bob".into()), Some("bob@".into()), Some("pw".into()))
            .unwrap_err();
        assert_eq!(err.messages(), &[messages::EMAIL_INVALID]);
    }

    #[test]
    fn test_profile_has_no_password() {
        let json = serde_json::to_value(sample_identity().profile()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["id"], 1);
        assert_eq!(obj["userName"], "alice");
        assert_eq!(obj["emailAddress"], "a@x.com");
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("passwordHash"));
    }

    #[test]
    fn test_debug_hides_hash() {
        let rendered = format!("{:?}", sample_identity());
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("argon2"));
    }

    #[test]
    fn test_register_debug_hides_password() {
        let reg =
            RegisterIdentity::new(Some("a".into()), Some("a@x.com".into()), Some("hunter2".into()))
                .unwrap();
        assert!(!format!("{reg:?}").contains("hunter2"));
    }
}
