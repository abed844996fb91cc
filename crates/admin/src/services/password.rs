//! Password hashing and verification.
//!
//! Argon2id with per-password random salts, stored as PHC strings. The
//! same functions back login, password reset, and the CLI user commands so
//! hashing stays uniform everywhere a password is written.

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password hashing.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing or hash parsing failed.
    #[error("password hashing error: {0}")]
    Hash(String),
}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::Hash(e.to_string())
    }
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns `PasswordError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// Returns `false` for a mismatch or an unparseable hash; the caller treats
/// both as invalid credentials.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
