//! User repository for database operations.
//!
//! Queries use runtime-checked `query_as` with `sqlx::FromRow` row mapping.
//! The reset-code queries enforce the single-use invariant in SQL: the final
//! reset is one atomic UPDATE that matches email + code + unexpired window
//! and clears the code columns in the same statement.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use prism_core::{Email, ResetCode, UserId};

use super::RepositoryError;
use crate::models::User;

const SELECT_USER: &str = r"
    SELECT id, email, password_hash, reset_code, reset_code_expires_at,
           created_at, updated_at
    FROM users
";

/// Repository for admin user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their normalized email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, reset_code, reset_code_expires_at,
                      created_at, updated_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Store a reset code and its expiry on a user.
    ///
    /// Overwrites any previous in-flight code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_reset_code(
        &self,
        id: UserId,
        code: &ResetCode,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET reset_code = $1, reset_code_expires_at = $2, updated_at = now()
            WHERE id = $3
            ",
        )
        .bind(code.as_str())
        .bind(expires_at)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Check whether an unexpired reset code exists for the email.
    ///
    /// Non-destructive: the code stays valid for the final reset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_valid_reset_code(
        &self,
        email: &Email,
        code: &ResetCode,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM users
                WHERE email = $1
                  AND reset_code = $2
                  AND reset_code_expires_at > now()
            )
            ",
        )
        .bind(email)
        .bind(code.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Atomically consume a reset code: set the new password hash and clear
    /// the code columns, but only if the code matches and is unexpired.
    ///
    /// Returns `true` when the reset succeeded, `false` when no row matched
    /// (wrong code, expired, already used, or unknown email).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn consume_reset_code(
        &self,
        email: &Email,
        code: &ResetCode,
        new_password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $1,
                reset_code = NULL,
                reset_code_expires_at = NULL,
                updated_at = now()
            WHERE email = $2
              AND reset_code = $3
              AND reset_code_expires_at > now()
            ",
        )
        .bind(new_password_hash)
        .bind(email)
        .bind(code.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Replace a user's password hash directly (CLI use).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $1, updated_at = now()
            WHERE email = $2
            ",
        )
        .bind(password_hash)
        .bind(email)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
