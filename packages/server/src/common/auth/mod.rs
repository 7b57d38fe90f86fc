//! Authorization for GraphQL operations.
//!
//! Every operation is classified against a static [`AccessPolicy`]. Public
//! operations run as-is; everything else needs a verified bearer token whose
//! subject resolves to a user or an author. The [`AuthorizationGate`] ties the
//! pieces together:
//!
//! ```ignore
//! let operation = Operation::parse(&request.query, request.operation_name.as_deref())?;
//! let ctx = RequestContext::from_headers(&headers, cancel);
//!
//! gate.authorize(ctx, &operation, |ctx| async move {
//!     // ctx.current_user() / ctx.current_author() are now populated
//!     execute(ctx).await
//! })
//! .await?;
//! ```

mod errors;
mod gate;
mod operation;
mod policy;
mod principal;
mod token;

pub use errors::AuthError;
pub use gate::{AuthorizationGate, RequestContext};
pub use operation::{Operation, OperationError, OperationKind};
pub use policy::{AccessPolicy, AccessRequirement, SUPER_ADMIN_ROLE};
pub use principal::{
    AuthorLookup, AuthorPrincipal, AuthorRecord, Principal, PrincipalResolver, UserLookup,
    UserPrincipal, UserRecord,
};
pub use token::{Claims, PrincipalKind, TokenVerifier};
