//! Authentication route handlers.
//!
//! Login issues a 24-hour bearer token; the three reset endpoints drive the
//! SPA's forgot-password wizard (enter email, enter code, set password).
//!
//! Enumeration resistance: `forgot-password` returns one fixed success body
//! whether or not the account exists, and login returns one fixed error for
//! both unknown email and wrong password. Account existence is only ever
//! visible in server-side logs.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use prism_core::{Email, ResetCode};

use crate::{
    db::UserRepository,
    error::AppError,
    models::UserSummary,
    services::email::{RESET_CODE_EXPIRY_MINUTES, generate_reset_code},
    services::password,
    state::AppState,
};

/// The one message `forgot-password` ever returns.
const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists with this email, a password reset code has been sent.";

/// Build the auth router. These routes are the only unauthenticated ones.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/verify-reset-code", post(verify_reset_code))
        .route("/api/auth/reset-password", post(reset_password))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the bearer token plus the public user view.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// POST /api/auth/login
///
/// # Errors
///
/// Returns `AppError::InvalidCredentials` for unknown email or wrong
/// password (same shape for both).
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // An unparseable email cannot belong to an account; fail with the same
    // error shape as a wrong password.
    let email = Email::parse(&body.email).map_err(|_| AppError::InvalidCredentials)?;

    let user = UserRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(|| {
            tracing::info!(email = %email, "Login attempt for unknown email");
            AppError::InvalidCredentials
        })?;

    if !password::verify_password(&body.password, &user.password_hash) {
        tracing::info!(email = %email, "Login attempt with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens().issue(user.id)?;
    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: user.summary(),
    }))
}

/// Forgot-password request body.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/auth/forgot-password
///
/// Always returns the same 200 body. When the account exists, generates a
/// 6-digit code with a 30-minute expiry and emails it.
///
/// # Errors
///
/// Returns a generic 500 if storing the code or sending the email fails for
/// an existing account.
async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let response = Json(json!({ "success": true, "message": RESET_REQUESTED_MESSAGE }));

    // A malformed email cannot belong to an account; respond as if it were
    // simply unknown.
    let Ok(email) = Email::parse(&body.email) else {
        return Ok(response);
    };

    let repo = UserRepository::new(state.pool());
    let Some(user) = repo.get_by_email(&email).await? else {
        tracing::info!(email = %email, "Password reset requested for unknown email");
        return Ok(response);
    };

    let code = generate_reset_code();
    let expires_at = Utc::now() + Duration::minutes(RESET_CODE_EXPIRY_MINUTES);
    repo.set_reset_code(user.id, &code, expires_at).await?;

    state.email().send_reset_code(email.as_str(), &code).await?;
    tracing::info!(user_id = %user.id, "Password reset code sent");

    Ok(response)
}

/// Verify-reset-code request body.
#[derive(Debug, Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

/// POST /api/auth/verify-reset-code
///
/// Non-destructive check backing the wizard's middle step. The code stays
/// valid; the final reset re-validates it.
///
/// # Errors
///
/// Returns `AppError::InvalidOrExpiredCode` when the code doesn't match or
/// has expired.
async fn verify_reset_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyResetCodeRequest>,
) -> Result<Json<Value>, AppError> {
    let email = Email::parse(&body.email).map_err(|_| AppError::InvalidOrExpiredCode)?;
    let code = ResetCode::parse(&body.code).map_err(|_| AppError::InvalidOrExpiredCode)?;

    let valid = UserRepository::new(state.pool())
        .has_valid_reset_code(&email, &code)
        .await?;

    if !valid {
        return Err(AppError::InvalidOrExpiredCode);
    }

    Ok(Json(json!({ "success": true, "message": "Code verified" })))
}

/// Reset-password request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// POST /api/auth/reset-password
///
/// Consumes the reset code in one atomic update: the new password hash is
/// written and the code cleared only when email + code match and the code
/// is unexpired. A second attempt with the same code therefore fails.
///
/// # Errors
///
/// Returns `AppError::Validation` for a too-short password and
/// `AppError::InvalidOrExpiredCode` when no row matched.
async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let email = Email::parse(&body.email).map_err(|_| AppError::InvalidOrExpiredCode)?;
    let code = ResetCode::parse(&body.code).map_err(|_| AppError::InvalidOrExpiredCode)?;

    if body.new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_owned(),
        ));
    }

    let new_hash = password::hash_password(&body.new_password)?;

    let reset = UserRepository::new(state.pool())
        .consume_reset_code(&email, &code, &new_hash)
        .await?;

    if !reset {
        tracing::info!(email = %email, "Invalid or expired reset code");
        return Err(AppError::InvalidOrExpiredCode);
    }

    tracing::info!(email = %email, "Password reset successful");
    Ok(Json(
        json!({ "success": true, "message": "Password has been reset successfully" }),
    ))
}
