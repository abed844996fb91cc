//! Unified error handling for the admin API.
//!
//! Every handler returns `Result<_, AppError>`. The `IntoResponse` impl maps
//! each variant to an HTTP status and a JSON body of the shape the SPA
//! expects: `{"success": false, "message": "..."}`. Credential and
//! reset-code failures deliberately use fixed generic messages so the
//! response shape never reveals whether an account exists.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::assets::AssetError;
use crate::services::email::EmailError;
use crate::services::password::PasswordError;
use crate::services::token::TokenError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Email delivery failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Login failed: unknown email or wrong password.
    /// One variant for both cases so the response cannot distinguish them.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password reset failed: code mismatch, expired, or already used.
    #[error("Invalid or expired reset code")]
    InvalidOrExpiredCode,

    /// Request content failed validation (file type, size, category, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AssetError> for AppError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::Io(io) => Self::Internal(format!("asset storage: {io}")),
            validation => Self::Validation(validation.to_string()),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures are logged with their cause; the client only
        // ever sees a generic message.
        if matches!(self, Self::Database(_) | Self::Email(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Admin request error");
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Email(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials
            | Self::InvalidOrExpiredCode
            | Self::Validation(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let message = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => {
                "Not found".to_string()
            }
            // Don't expose internal error details to clients
            Self::Database(_) | Self::Email(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::InvalidOrExpiredCode => "Invalid or expired reset code".to_string(),
            Self::Validation(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::InvalidOrExpiredCode),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Validation("too many images".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("preset 9".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("no token".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        // The Display impl carries detail for logs; the response must not.
        let err = AppError::Internal("connection refused to 10.0.0.5".into());
        assert!(err.to_string().contains("connection refused"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_credential_errors_share_a_shape() {
        // Unknown email and wrong password both surface as the same body.
        let a = AppError::InvalidCredentials.into_response();
        let b = AppError::InvalidCredentials.into_response();
        assert_eq!(a.status(), b.status());

        let a_body = axum::body::to_bytes(a.into_body(), usize::MAX)
            .await
            .expect("body");
        let b_body = axum::body::to_bytes(b.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(a_body, b_body);
    }
}
