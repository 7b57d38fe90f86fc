//! Per-operation authorization in front of GraphQL execution.

use std::future::Future;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{
    AccessPolicy, AuthError, AuthorPrincipal, Operation, Principal, PrincipalResolver,
    TokenVerifier, UserPrincipal, SUPER_ADMIN_ROLE,
};

/// Request-scoped state threaded from the HTTP layer to the resolvers.
///
/// Holds the raw `Authorization` header, the request's cancellation token and,
/// once the gate has run, the resolved principal.
#[derive(Debug, Clone)]
pub struct RequestContext {
    authorization: Option<String>,
    cancellation: CancellationToken,
    principal: Option<Principal>,
}

impl RequestContext {
    pub fn new(authorization: Option<String>, cancellation: CancellationToken) -> Self {
        Self {
            authorization,
            cancellation,
            principal: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap, cancellation: CancellationToken) -> Self {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        Self::new(authorization, cancellation)
    }

    /// Token carried by the `Authorization` header, with or without a `Bearer ` prefix
    pub fn bearer_token(&self) -> Option<&str> {
        let raw = self.authorization.as_deref()?.trim();
        let token = match raw.split_once(' ') {
            Some(("Bearer", rest)) => rest.trim(),
            _ if raw == "Bearer" => "",
            _ => raw,
        };
        (!token.is_empty()).then_some(token)
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The user the gate attached, if the operation was made by a user
    pub fn current_user(&self) -> Option<&UserPrincipal> {
        self.principal.as_ref().and_then(Principal::as_user)
    }

    /// The author the gate attached, if the operation was made by an author
    pub fn current_author(&self) -> Option<&AuthorPrincipal> {
        self.principal.as_ref().and_then(Principal::as_author)
    }

    fn with_principal(self, principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            ..self
        }
    }
}

/// Decides whether an operation may run and who is running it.
///
/// Stateless apart from read-only collaborators; one instance serves every
/// request concurrently.
#[derive(Clone)]
pub struct AuthorizationGate {
    policy: Arc<AccessPolicy>,
    verifier: Arc<dyn TokenVerifier>,
    resolver: PrincipalResolver,
}

impl AuthorizationGate {
    pub fn new(
        policy: Arc<AccessPolicy>,
        verifier: Arc<dyn TokenVerifier>,
        resolver: PrincipalResolver,
    ) -> Self {
        Self {
            policy,
            verifier,
            resolver,
        }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Run `next` for `operation` if the caller is allowed to.
    ///
    /// `next` receives the context, extended with the principal when the
    /// operation needed one. On denial `next` is never called.
    pub async fn authorize<F, Fut, R>(
        &self,
        ctx: RequestContext,
        operation: &Operation,
        next: F,
    ) -> Result<R, AuthError>
    where
        F: FnOnce(RequestContext) -> Fut,
        Fut: Future<Output = R>,
    {
        let ctx = self.admit(ctx, operation).await?;
        Ok(next(ctx).await)
    }

    /// The decision half of [`authorize`](Self::authorize)
    pub async fn admit(
        &self,
        ctx: RequestContext,
        operation: &Operation,
    ) -> Result<RequestContext, AuthError> {
        let requirement = self.policy.classify(operation);
        if requirement.is_public() {
            return still_live(ctx);
        }

        let result = self.authenticate(&ctx, requirement.needs_super_admin).await;
        match result {
            Ok(principal) => {
                debug!(
                    operation = operation.name().unwrap_or("<anonymous>"),
                    kind = %operation.kind(),
                    principal = %principal.kind(),
                    "Operation authorized"
                );
                still_live(ctx.with_principal(principal))
            }
            Err(e) => {
                debug!(
                    operation = operation.name().unwrap_or("<anonymous>"),
                    kind = %operation.kind(),
                    reason = e.code(),
                    "Operation denied"
                );
                Err(e)
            }
        }
    }

    async fn authenticate(
        &self,
        ctx: &RequestContext,
        needs_super_admin: bool,
    ) -> Result<Principal, AuthError> {
        let token = ctx.bearer_token().ok_or(AuthError::MissingCredential)?;

        let claims = self
            .verifier
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;

        // Rejected here so an under-privileged token never costs a lookup
        if needs_super_admin && !claims.has_role(SUPER_ADMIN_ROLE) {
            return Err(AuthError::InsufficientRole);
        }

        claims.principal_kind()?;

        let cancellation = ctx.cancellation();
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(AuthError::Canceled),
            resolved = self.resolver.resolve(&claims) => resolved,
        }
    }
}

/// A canceled request is never delegated, even once the decision is made
fn still_live(ctx: RequestContext) -> Result<RequestContext, AuthError> {
    if ctx.is_cancelled() {
        return Err(AuthError::Canceled);
    }
    Ok(ctx)
}
