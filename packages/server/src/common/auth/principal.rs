//! Resolved caller identities and the lookups that produce them.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use super::{AuthError, Claims, PrincipalKind};
use crate::common::{AuthorId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrincipal {
    pub id: UserId,
    pub role: String,
}

/// Authors never hold admin privileges, so they carry no role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorPrincipal {
    pub id: AuthorId,
}

/// The authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User(UserPrincipal),
    Author(AuthorPrincipal),
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::User(_) => PrincipalKind::User,
            Principal::Author(_) => PrincipalKind::Author,
        }
    }

    pub fn as_user(&self) -> Option<&UserPrincipal> {
        match self {
            Principal::User(user) => Some(user),
            Principal::Author(_) => None,
        }
    }

    pub fn as_author(&self) -> Option<&AuthorPrincipal> {
        match self {
            Principal::Author(author) => Some(author),
            Principal::User(_) => None,
        }
    }
}

/// Minimal user row needed to build a [`UserPrincipal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub role: String,
}

/// Minimal author row needed to build an [`AuthorPrincipal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: AuthorId,
}

#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
pub trait AuthorLookup: Send + Sync {
    async fn find_author_by_email(&self, email: &str) -> Result<Option<AuthorRecord>>;
}

/// Turns verified claims into a [`Principal`]
#[derive(Clone)]
pub struct PrincipalResolver {
    users: Arc<dyn UserLookup>,
    authors: Arc<dyn AuthorLookup>,
}

impl PrincipalResolver {
    pub fn new(users: Arc<dyn UserLookup>, authors: Arc<dyn AuthorLookup>) -> Self {
        Self { users, authors }
    }

    /// Load the principal named by `claims`.
    ///
    /// A storage failure is reported exactly like a missing record.
    pub async fn resolve(&self, claims: &Claims) -> Result<Principal, AuthError> {
        let kind = claims.principal_kind()?;
        let email = claims.subject_email.as_str();

        let found = match kind {
            PrincipalKind::User => self.users.find_user_by_email(email).await.map(|user| {
                user.map(|u| {
                    Principal::User(UserPrincipal {
                        id: u.id,
                        role: u.role,
                    })
                })
            }),
            PrincipalKind::Author => self
                .authors
                .find_author_by_email(email)
                .await
                .map(|author| author.map(|a| Principal::Author(AuthorPrincipal { id: a.id }))),
        };

        match found {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => Err(AuthError::PrincipalNotFound(kind)),
            Err(e) => {
                warn!(kind = %kind, error = %e, "Principal lookup failed");
                Err(AuthError::PrincipalNotFound(kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockAuthorLookup, MockUserLookup};

    fn claims(email: &str, kind: &str) -> Claims {
        Claims {
            subject_email: email.to_string(),
            principal_kind: kind.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_user() {
        let user_id = UserId::new();
        let users = Arc::new(MockUserLookup::new().with_user("ada@example.com", user_id, "USER"));
        let resolver = PrincipalResolver::new(users, Arc::new(MockAuthorLookup::new()));

        let principal = resolver
            .resolve(&claims("ada@example.com", "user"))
            .await
            .unwrap();

        assert_eq!(
            principal,
            Principal::User(UserPrincipal {
                id: user_id,
                role: "USER".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_resolves_author_through_author_lookup_only() {
        let author_id = AuthorId::new();
        let users = Arc::new(MockUserLookup::new());
        let authors = Arc::new(MockAuthorLookup::new().with_author("jane@example.com", author_id));
        let resolver = PrincipalResolver::new(users.clone(), authors.clone());

        let principal = resolver
            .resolve(&claims("jane@example.com", "author"))
            .await
            .unwrap();

        assert_eq!(principal.as_author().map(|a| a.id), Some(author_id));
        assert!(principal.as_user().is_none());
        assert_eq!(users.calls().len(), 0);
        assert_eq!(authors.calls(), vec!["jane@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_author_is_not_found() {
        let resolver = PrincipalResolver::new(
            Arc::new(MockUserLookup::new()),
            Arc::new(MockAuthorLookup::new()),
        );

        let err = resolver
            .resolve(&claims("ghost@example.com", "author"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::PrincipalNotFound(PrincipalKind::Author));
    }

    #[tokio::test]
    async fn test_lookup_failure_reads_as_not_found() {
        let resolver = PrincipalResolver::new(
            Arc::new(MockUserLookup::new().failing()),
            Arc::new(MockAuthorLookup::new()),
        );

        let err = resolver
            .resolve(&claims("ada@example.com", "user"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::PrincipalNotFound(PrincipalKind::User));
    }

    #[tokio::test]
    async fn test_unknown_kind_is_invalid_token() {
        let users = Arc::new(MockUserLookup::new());
        let resolver = PrincipalResolver::new(users.clone(), Arc::new(MockAuthorLookup::new()));

        let err = resolver
            .resolve(&claims("ada@example.com", "robot"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
        assert!(users.calls().is_empty());
    }
}
