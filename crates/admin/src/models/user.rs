//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use prism_core::{Email, UserId};

/// An admin user row.
///
/// The password hash and reset columns never leave the server; responses use
/// [`UserSummary`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Normalized email address (unique).
    pub email: Email,
    /// Argon2id hash of the password (PHC string).
    pub password_hash: String,
    /// 6-digit reset code, set while a password reset is in flight.
    pub reset_code: Option<String>,
    /// When the reset code stops being valid.
    pub reset_code_expires_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The public view of this user, as returned from login.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Public view of a user, embedded in the login response.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
}
