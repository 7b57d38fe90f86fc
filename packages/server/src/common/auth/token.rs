use std::fmt;
use std::str::FromStr;

use super::AuthError;

/// The two kinds of identity a bearer token can stand for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    User,
    Author,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "user",
            PrincipalKind::Author => "author",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalKind {
    type Err = AuthError;

    /// Anything but "user" or "author" means the token was not minted by us.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(PrincipalKind::User),
            "author" => Ok(PrincipalKind::Author),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Verified token payload, as far as the gate is concerned.
///
/// `principal_kind` is kept raw; it is validated after the role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject_email: String,
    pub principal_kind: String,
    pub role: Option<String>,
}

impl Claims {
    pub fn principal_kind(&self) -> Result<PrincipalKind, AuthError> {
        self.principal_kind.parse()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

/// Checks a bearer token and yields its claims.
///
/// Implementations must fail with [`AuthError::InvalidToken`] for empty,
/// malformed, badly signed and expired tokens alike.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_kind_parsing() {
        assert_eq!("user".parse::<PrincipalKind>(), Ok(PrincipalKind::User));
        assert_eq!("author".parse::<PrincipalKind>(), Ok(PrincipalKind::Author));
        assert_eq!("admin".parse::<PrincipalKind>(), Err(AuthError::InvalidToken));
        assert_eq!("User".parse::<PrincipalKind>(), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_has_role() {
        let claims = Claims {
            subject_email: "a@b.c".to_string(),
            principal_kind: "user".to_string(),
            role: Some("SUPER_ADMIN".to_string()),
        };
        assert!(claims.has_role("SUPER_ADMIN"));
        assert!(!Claims { role: None, ..claims }.has_role("SUPER_ADMIN"));
    }
}
