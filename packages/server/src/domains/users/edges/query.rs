use juniper::FieldResult;
use tracing::error;

use crate::domains::users::data::{UserData, UsersPayload};
use crate::domains::users::models::User;
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::field_error;

const DEFAULT_PAGE_SIZE: i32 = 20;
const MAX_PAGE_SIZE: i32 = 100;

/// The user making the request
pub async fn me(ctx: &GraphQLContext) -> FieldResult<UserData> {
    let principal = ctx.require_user()?;

    let user = User::find_by_id(principal.id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(user_id = %principal.id, error = %e, "Failed to load current user");
            field_error("Failed to load user")
        })?
        .ok_or_else(|| field_error("User not found"))?;

    Ok(user.into())
}

/// List users (the gate only lets super admins this far)
pub async fn users(
    ctx: &GraphQLContext,
    limit: Option<i32>,
    offset: Option<i32>,
) -> FieldResult<UsersPayload> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);

    let (users, total) = User::find_all(limit as i64, offset as i64, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list users");
            field_error("Failed to list users")
        })?;

    Ok(UsersPayload {
        users: users.into_iter().map(UserData::from).collect(),
        total: total as i32,
    })
}
