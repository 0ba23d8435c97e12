//! User record and its identifier.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;

/// Intentionally permissive `local@domain.tld` shape, not full RFC 5322.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email pattern"));

/// Type-safe wrapper for user identifiers.
///
/// A 128-bit random value. The external form is the canonical 36-character
/// hyphenated UUID string; parsing rejects every other representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier (v4).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the hyphenated form is valid externally; `Uuid::parse_str`
        // alone would also accept simple/braced/urn forms.
        if s.len() != 36 {
            return Err(ValidationError::InvalidUserId);
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidUserId)
    }
}

/// Trim a user name and reject empty values.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// Trim an email address and reject empty or out-of-shape values.
pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    Ok(email)
}

/// An immutable, always-valid user record.
///
/// Constructed only through [`User::new`], which trims and validates both
/// fields. There are no setters; the store mutates by whole-value
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Build a validated user. Checks run in order (name, then email
    /// presence, then email shape) and the first failure wins.
    pub fn new(id: UserId, name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let email = validate_email(email)?;
        Ok(Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Rebind this record to `id`. Used by the store to guarantee the
    /// replacement installed under a key carries that same key.
    pub(crate) fn with_id(self, id: UserId) -> Self {
        Self { id, ..self }
    }
}
