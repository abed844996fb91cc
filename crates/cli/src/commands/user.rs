//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! prism-cli user create -e admin@example.com -p 's3cure-pass'
//!
//! # Change an existing user's password
//! prism-cli user set-password -e admin@example.com -p 'new-pass'
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use prism_admin::db::{RepositoryError, UserRepository};
use prism_admin::services::password::{self, PasswordError};
use prism_core::{Email, EmailError};

/// Minimum password length accepted from the command line.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during user management.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Hashing error: {0}")]
    Hashing(#[from] PasswordError),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// No user with the given email.
    #[error("No user found with email: {0}")]
    NoSuchUser(String),
}

async fn connect() -> Result<PgPool, UserError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| UserError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(&database_url).await?)
}

fn check_password(password: &str) -> Result<(), UserError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserError::WeakPassword);
    }
    Ok(())
}

/// Create a new admin user with the given credentials.
///
/// # Errors
///
/// Returns `UserError` if the email is invalid, the password is too short,
/// or a user with that email already exists.
pub async fn create(email: &str, password: &str) -> Result<(), UserError> {
    let email = Email::parse(email)?;
    check_password(password)?;

    let pool = connect().await?;
    let hash = password::hash_password(password)?;

    let user = UserRepository::new(&pool)
        .create(&email, &hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UserExists(email.to_string()),
            other => UserError::Repository(other),
        })?;

    tracing::info!("User created successfully! ID: {}, Email: {}", user.id, user.email);
    Ok(())
}

/// Replace an existing user's password.
///
/// # Errors
///
/// Returns `UserError` if the email is invalid, the password is too short,
/// or no user with that email exists.
pub async fn set_password(email: &str, password: &str) -> Result<(), UserError> {
    let email = Email::parse(email)?;
    check_password(password)?;

    let pool = connect().await?;
    let hash = password::hash_password(password)?;

    UserRepository::new(&pool)
        .update_password(&email, &hash)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => UserError::NoSuchUser(email.to_string()),
            other => UserError::Repository(other),
        })?;

    tracing::info!("Password updated for {}", email);
    Ok(())
}
