use axum::http::StatusCode;
use thiserror::Error;

use super::PrincipalKind;

/// Reasons the authorization gate refuses to run an operation.
///
/// Display strings are what the client sees. Malformed, forged and expired
/// tokens all read the same on purpose.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingCredential,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Unauthorized! Only admins are authorized to make this request.")]
    InsufficientRole,

    #[error("no {0} found with this email")]
    PrincipalNotFound(PrincipalKind),

    #[error("Request was canceled")]
    Canceled,
}

impl AuthError {
    /// HTTP status used when the denial is rendered as a GraphQL error body
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidToken
            | AuthError::PrincipalNotFound(_) => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::Canceled => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Short machine-readable code placed in the GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::InsufficientRole => "INSUFFICIENT_ROLE",
            AuthError::PrincipalNotFound(_) => "PRINCIPAL_NOT_FOUND",
            AuthError::Canceled => "CANCELED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_leak_details() {
        assert_eq!(
            AuthError::InvalidToken.to_string(),
            "Invalid authorization token"
        );
        assert_eq!(
            AuthError::PrincipalNotFound(PrincipalKind::Author).to_string(),
            "no author found with this email"
        );
        assert_eq!(
            AuthError::PrincipalNotFound(PrincipalKind::User).to_string(),
            "no user found with this email"
        );
        assert!(!AuthError::InsufficientRole.to_string().contains("users"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InsufficientRole.status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
