//! Field validation for request payloads.
//!
//! Validation collects every failing rule into one [`ValidationErrors`]
//! so a client sees all problems in a single 400 response.

/// User-facing validation messages.
pub mod messages {
    pub const TITLE_REQUIRED: &str = "Please provide a title";
    pub const CONTENT_REQUIRED: &str = "Please provide content";
    pub const USER_NAME_REQUIRED: &str = "Please provide a user name";
    pub const USER_NAME_INVALID: &str = "A user name cannot contain a colon";
    pub const EMAIL_REQUIRED: &str = "Please provide an email address";
    pub const EMAIL_INVALID: &str = "Please provide a valid email address";
    pub const PASSWORD_REQUIRED: &str = "Please provide a password";
    pub const USER_NAME_TAKEN: &str = "The user name you entered already exists";
    pub const EMAIL_TAKEN: &str = "The email address you entered already exists";
}

/// One or more field validation failures, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// A single-message error.
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

/// Keep `value` if it is present and not blank, otherwise record `message`.
pub(crate) fn require(
    value: Option<String>,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(message);
            None
        }
    }
}

/// Loose structural check: `local@domain.tld` with no whitespace.
pub fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}
