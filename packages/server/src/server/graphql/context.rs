use std::sync::Arc;

use juniper::FieldResult;
use sqlx::PgPool;

use crate::common::auth::{AuthorPrincipal, UserPrincipal};
use crate::common::RequestContext;
use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;

use super::util::field_error;

/// GraphQL request context
///
/// Built per operation from the context the authorization gate returned, so
/// `request` already carries the principal when the operation needed one.
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub request: RequestContext,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: &ServerDeps, request: RequestContext) -> Self {
        Self {
            db_pool: deps.db_pool.clone(),
            jwt_service: deps.jwt_service.clone(),
            request,
        }
    }

    pub fn current_user(&self) -> Option<&UserPrincipal> {
        self.request.current_user()
    }

    pub fn current_author(&self) -> Option<&AuthorPrincipal> {
        self.request.current_author()
    }

    /// The calling user, or an error when an author (or nobody) is calling
    pub fn require_user(&self) -> FieldResult<&UserPrincipal> {
        self.current_user()
            .ok_or_else(|| field_error("This operation requires a user token"))
    }

    /// The calling author, or an error when a user (or nobody) is calling
    pub fn require_author(&self) -> FieldResult<&AuthorPrincipal> {
        self.current_author()
            .ok_or_else(|| field_error("This operation requires an author token"))
    }
}
