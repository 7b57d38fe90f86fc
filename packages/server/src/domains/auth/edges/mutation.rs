use juniper::FieldResult;
use tracing::{error, info, warn};

use crate::domains::auth::data::{ChangePasswordResponse, LoginResponse};
use crate::domains::auth::jwt::generate_refresh_token;
use crate::domains::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::domains::authors::models::Author;
use crate::domains::users::models::User;
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::field_error;

const BAD_CREDENTIALS: &str = "Invalid credentials";

/// Sign a user in with username and password
///
/// Issues an access token carrying the user's role and rotates the stored
/// refresh token.
pub async fn login(ctx: &GraphQLContext, username: String, password: String) -> FieldResult<LoginResponse> {
    let user = User::find_by_username(&username, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up user for login");
            field_error("Login failed")
        })?
        .ok_or_else(|| field_error(BAD_CREDENTIALS))?;

    if verify_password(&password, &user.password).is_err() {
        warn!(user_id = %user.id, "Login rejected: bad password");
        return Err(field_error(BAD_CREDENTIALS));
    }

    if !user.active {
        warn!(user_id = %user.id, "Login rejected: inactive account");
        return Err(field_error("This account is inactive"));
    }

    let response = issue_user_tokens(ctx, &user).await?;
    info!(user_id = %user.id, "User logged in");
    Ok(response)
}

/// Sign an author in with email and password
pub async fn author_login(ctx: &GraphQLContext, email: String, password: String) -> FieldResult<LoginResponse> {
    let author = Author::find_by_email(&email, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up author for login");
            field_error("Login failed")
        })?
        .ok_or_else(|| field_error(BAD_CREDENTIALS))?;

    if verify_password(&password, &author.password).is_err() {
        warn!(author_id = %author.id, "Author login rejected: bad password");
        return Err(field_error(BAD_CREDENTIALS));
    }

    let token = ctx
        .jwt_service
        .create_author_token(author.id, &author.email)
        .map_err(|e| {
            error!(error = %e, "Failed to sign author token");
            field_error("Login failed")
        })?;

    info!(author_id = %author.id, "Author logged in");
    Ok(LoginResponse {
        token,
        refresh_token: None,
    })
}

/// Change the current user's password
pub async fn change_password(
    ctx: &GraphQLContext,
    old_password: String,
    new_password: String,
) -> FieldResult<ChangePasswordResponse> {
    let principal = ctx.require_user()?;

    let user = User::find_by_id(principal.id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(user_id = %principal.id, error = %e, "Failed to load user");
            field_error("Failed to change password")
        })?
        .ok_or_else(|| field_error("User not found"))?;

    if verify_password(&old_password, &user.password).is_err() {
        return Err(field_error("Old password is incorrect"));
    }
    validate_password_strength(&new_password).map_err(field_error)?;

    let password_hash = hash_password(&new_password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        field_error("Failed to change password")
    })?;

    User::update_password(user.id, &password_hash, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to store password");
            field_error("Failed to change password")
        })?;

    info!(user_id = %user.id, "Password changed");
    Ok(ChangePasswordResponse { ok: true })
}

/// Exchange a stored refresh token for a fresh token pair
pub async fn refresh_token(ctx: &GraphQLContext, token: String) -> FieldResult<LoginResponse> {
    let user = User::find_by_token(&token, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up refresh token");
            field_error("Failed to refresh token")
        })?
        .ok_or_else(|| field_error("Refresh token is not valid"))?;

    if !user.active {
        return Err(field_error("This account is inactive"));
    }

    issue_user_tokens(ctx, &user).await
}

async fn issue_user_tokens(ctx: &GraphQLContext, user: &User) -> FieldResult<LoginResponse> {
    let token = ctx
        .jwt_service
        .create_user_token(user.id, &user.email, &user.role)
        .map_err(|e| {
            error!(error = %e, "Failed to sign user token");
            field_error("Failed to issue token")
        })?;

    let refresh = generate_refresh_token(&token);
    User::update_token(user.id, &refresh, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to store refresh token");
            field_error("Failed to issue token")
        })?;

    Ok(LoginResponse {
        token,
        refresh_token: Some(refresh),
    })
}
