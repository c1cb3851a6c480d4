//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::UserValidationError;

/// User identifier - an opaque UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a UserId from an existing UUID string
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();

        if uuid::Uuid::parse_str(&id).is_err() {
            return Err(UserValidationError::InvalidId);
        }

        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User account entity
///
/// The password is stored as a salted PBKDF2 digest; the plaintext never
/// reaches the entity. `password_key` is the per-user salt, generated at
/// registration and rotated on every password change.
#[derive(Debug, Clone)]
pub struct User {
    pk: UserId,
    email: String,
    password_hash: String,
    password_key: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        pk: UserId,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        password_key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            pk,
            email: email.into(),
            password_hash: password_hash.into(),
            password_key: password_key.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from stored state
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        pk: UserId,
        email: String,
        password_hash: String,
        password_key: String,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pk,
            email,
            password_hash,
            password_key,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn pk(&self) -> &UserId {
        &self.pk
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn password_key(&self) -> &str {
        &self.password_key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Update the email address
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replace the stored credential. The salt is replaced together with the
    /// hash so an old digest can never be cross-checked against a new salt.
    pub fn set_credential(
        &mut self,
        password_hash: impl Into<String>,
        password_key: impl Into<String>,
    ) {
        self.password_hash = password_hash.into();
        self.password_key = password_key.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
