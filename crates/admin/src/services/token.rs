//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user id, valid for 24 hours, matching
//! the session length the SPA expects. The keys are derived once from
//! `JWT_SECRET` at startup.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prism_core::UserId;

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is malformed, has a bad signature, or is expired.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The expiry timestamp could not be computed.
    #[error("invalid expiry timestamp")]
    BadExpiry,
}

/// JWT claims carried by an admin bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: i32,
    /// Expiry as a unix timestamp.
    exp: i64,
}

/// Issues and verifies admin bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token for the user, valid for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let expiry = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or(TokenError::BadExpiry)?;

        let claims = Claims {
            sub: user_id.as_i32(),
            exp: expiry.timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the token is malformed, tampered
    /// with, or expired.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?;

        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from(
            "kX9#mP2$vL5@nQ8!wR3%jT6^bY1&hU4*".to_owned(),
        ))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(UserId::new(7)).expect("issue");
        let user_id = tokens.verify(&token).expect("verify");
        assert_eq!(user_id, UserId::new(7));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = service();
        assert!(tokens.verify("not-a-token").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = TokenService::new(&SecretString::from(
            "zQ4!wE7@rT2#yU9$iO6%pA3^sD1&fG8*".to_owned(),
        ));
        let token = other.issue(UserId::new(1)).expect("issue");
        assert!(service().verify(&token).is_err());
    }
}
