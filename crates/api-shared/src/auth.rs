//! Mock ABHA token checks.
//!
//! Tokens are not verified against any identity provider. Any token that is non-empty after
//! trimming is accepted.

/// Request header carrying the session token on authenticated endpoints.
pub const ABHA_TOKEN_HEADER: &str = "x-abha-token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing ABHA token")]
    MissingToken,
}

/// Validates the provided ABHA token.
///
/// Returns `Ok(())` if the token is present, or an error if it is missing or blank.
pub fn validate_abha_token(provided_token: Option<&str>) -> Result<(), AuthError> {
    match provided_token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(AuthError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_non_blank_token() {
        assert_eq!(validate_abha_token(Some("test-token")), Ok(()));
        assert_eq!(validate_abha_token(Some(" 91-1234-5678-9012 ")), Ok(()));
    }

    #[test]
    fn rejects_missing_or_blank_token() {
        assert_eq!(validate_abha_token(None), Err(AuthError::MissingToken));
        assert_eq!(validate_abha_token(Some("")), Err(AuthError::MissingToken));
        assert_eq!(validate_abha_token(Some("   ")), Err(AuthError::MissingToken));
    }
}
