//! Password reset code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ResetCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ResetCodeError {
    /// The code is not exactly six characters.
    #[error("reset code must be exactly 6 digits")]
    WrongLength,
    /// The code contains non-digit characters.
    #[error("reset code must contain only digits")]
    NotNumeric,
}

/// A 6-digit numeric password reset code.
///
/// Codes are generated server-side, emailed to the account holder, and
/// expire 30 minutes after issue. The stored code is cleared on successful
/// reset, making it single-use.
///
/// ```
/// use prism_core::ResetCode;
///
/// assert!(ResetCode::parse("123456").is_ok());
/// assert!(ResetCode::parse("12345").is_err());
/// assert!(ResetCode::parse("12345a").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResetCode(String);

impl ResetCode {
    /// Number of digits in a reset code.
    pub const LENGTH: usize = 6;

    /// Parse a `ResetCode` from a string.
    ///
    /// Surrounding whitespace is stripped before validation so codes pasted
    /// from email clients are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly six ASCII digits.
    pub fn parse(s: &str) -> Result<Self, ResetCodeError> {
        let trimmed = s.trim();

        if trimmed.len() != Self::LENGTH {
            return Err(ResetCodeError::WrongLength);
        }

        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ResetCodeError::NotNumeric);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ResetCode {
    type Err = ResetCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let code = ResetCode::parse("042137").unwrap();
        assert_eq!(code.as_str(), "042137");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = ResetCode::parse("  123456 ").unwrap();
        assert_eq!(code.as_str(), "123456");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            ResetCode::parse("12345"),
            Err(ResetCodeError::WrongLength)
        ));
        assert!(matches!(
            ResetCode::parse("1234567"),
            Err(ResetCodeError::WrongLength)
        ));
        assert!(matches!(
            ResetCode::parse(""),
            Err(ResetCodeError::WrongLength)
        ));
    }

    #[test]
    fn test_parse_not_numeric() {
        assert!(matches!(
            ResetCode::parse("12345a"),
            Err(ResetCodeError::NotNumeric)
        ));
        assert!(matches!(
            ResetCode::parse("12 456"),
            Err(ResetCodeError::NotNumeric)
        ));
    }
}
