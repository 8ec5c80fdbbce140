//! Authentication module: HTTP Basic credential verification and password hashing.
//!
//! [`CurrentUser`] is the credential guard. It decodes
//! `Authorization: Basic <base64(user:password)>`, loads the identity by
//! user name and checks the password against the stored Argon2 hash. Every
//! failure produces the same 401, and an unknown user name still pays for
//! one Argon2 verification, so neither the body nor the latency tells an
//! unknown user from a wrong password.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use notes_core::Identity;
use notes_store::Repository;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// User name and password taken from a Basic `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .finish_non_exhaustive()
    }
}

/// Parse the value of an `Authorization` header using the Basic scheme.
///
/// Returns `None` for other schemes, bad base64, non-UTF-8 payloads, a
/// missing `:` separator or an empty user name. The password may itself
/// contain `:`.
pub fn parse_basic_authorization(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user_name, password) = decoded.split_once(':')?;
    if user_name.is_empty() {
        return None;
    }

    Some(Credentials {
        user_name: user_name.to_string(),
        password: password.to_string(),
    })
}

/// Hash checked when the user name is unknown, so that branch costs the
/// same as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("unknown-user-placeholder").ok());

/// Resolve `credentials` to a stored identity.
pub async fn verify_credentials(
    repository: &dyn Repository,
    credentials: &Credentials,
) -> ApiResult<Identity> {
    let Some(identity) = repository
        .find_identity_by_user_name(&credentials.user_name)
        .await?
    else {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(&credentials.password, hash);
        }
        tracing::warn!(user_name = %credentials.user_name, "Authentication failed: unknown user");
        return Err(ApiError::access_denied());
    };

    if !verify_password(&credentials.password, &identity.password_hash)? {
        tracing::warn!(user_name = %credentials.user_name, "Authentication failed: wrong password");
        return Err(ApiError::access_denied());
    }

    tracing::debug!(identity_id = %identity.id, "Authentication successful");
    Ok(identity)
}

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(password_hash.to_string())
}

/// Verify a password against a hash.
///
/// The comparison of the derived key is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The identity resolved by the credential guard.
///
/// Cached in request extensions so later guards on the same request reuse
/// it instead of hashing again.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let credentials = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic_authorization)
            .ok_or_else(|| {
                tracing::debug!("Missing or malformed Basic authorization header");
                ApiError::access_denied()
            })?;

        let identity = verify_credentials(state.repository(), &credentials).await?;
        let current = CurrentUser(identity);
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
