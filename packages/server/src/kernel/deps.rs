//! Server dependencies shared by the router and the resolvers
//!
//! The authorization gate only sees trait objects; the adapters here back
//! those traits with the Postgres models.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::auth::{
    AccessPolicy, AuthorLookup, AuthorRecord, AuthorizationGate, PrincipalResolver, UserLookup,
    UserRecord,
};
use crate::domains::auth::JwtService;
use crate::domains::authors::models::Author;
use crate::domains::users::models::User;

// =============================================================================
// Lookup adapters (implement the gate's lookup traits)
// =============================================================================

/// Finds users by the email carried in their token
pub struct PgUserLookup(pub PgPool);

#[async_trait]
impl UserLookup for PgUserLookup {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = User::find_by_email(email, &self.0).await?;
        Ok(user.map(|u| UserRecord {
            id: u.id,
            role: u.role,
        }))
    }
}

/// Finds authors by the email carried in their token
pub struct PgAuthorLookup(pub PgPool);

#[async_trait]
impl AuthorLookup for PgAuthorLookup {
    async fn find_author_by_email(&self, email: &str) -> Result<Option<AuthorRecord>> {
        let author = Author::find_by_email(email, &self.0).await?;
        Ok(author.map(|a| AuthorRecord { id: a.id }))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            jwt_service,
        }
    }

    /// Gate wired to the standard policy, this JWT service and Postgres lookups
    pub fn authorization_gate(&self) -> AuthorizationGate {
        let resolver = PrincipalResolver::new(
            Arc::new(PgUserLookup(self.db_pool.clone())),
            Arc::new(PgAuthorLookup(self.db_pool.clone())),
        );

        AuthorizationGate::new(AccessPolicy::standard(), self.jwt_service.clone(), resolver)
    }
}
