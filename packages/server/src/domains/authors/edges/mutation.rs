use juniper::FieldResult;
use tracing::{error, info};

use crate::common::auth::SUPER_ADMIN_ROLE;
use crate::common::AuthorId;
use crate::domains::auth::password::{hash_password, validate_password_strength};
use crate::domains::authors::data::{AuthorCreateInput, AuthorData, AuthorUpdateInput};
use crate::domains::authors::models::{Author, CreateAuthor, UpdateAuthor};
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::{field_error, parse_id};

/// Register a new author (public, this is how authors sign up)
pub async fn create_author(ctx: &GraphQLContext, input: AuthorCreateInput) -> FieldResult<AuthorData> {
    validate_password_strength(&input.password).map_err(field_error)?;

    if Author::find_by_email(&input.email, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to check author email");
            field_error("Failed to create author")
        })?
        .is_some()
    {
        return Err(field_error("An author with this email already exists"));
    }

    let password_hash = hash_password(&input.password).map_err(|e| {
        error!(error = %e, "Failed to hash author password");
        field_error("Failed to create author")
    })?;

    let author = Author::create(
        CreateAuthor {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
        },
        &ctx.db_pool,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to insert author");
        field_error("Failed to create author")
    })?;

    info!(author_id = %author.id, "Author created");
    Ok(author.into())
}

pub async fn update_author(ctx: &GraphQLContext, input: AuthorUpdateInput) -> FieldResult<AuthorData> {
    let author_id: AuthorId = parse_id(&input.id, "author id")?;
    ensure_can_manage(ctx, author_id)?;

    let author = Author::update(
        author_id,
        UpdateAuthor {
            first_name: input.first_name,
            last_name: input.last_name,
        },
        &ctx.db_pool,
    )
    .await
    .map_err(|e| {
        error!(author_id = %author_id, error = %e, "Failed to update author");
        field_error("Failed to update author")
    })?
    .ok_or_else(|| field_error("Author not found"))?;

    Ok(author.into())
}

pub async fn delete_author(ctx: &GraphQLContext, id: String) -> FieldResult<AuthorData> {
    let author_id: AuthorId = parse_id(&id, "author id")?;
    ensure_can_manage(ctx, author_id)?;

    let author = Author::delete(author_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(author_id = %author_id, error = %e, "Failed to delete author");
            field_error("Failed to delete author")
        })?
        .ok_or_else(|| field_error("no author deleted"))?;

    info!(author_id = %author_id, "Author deleted");
    Ok(author.into())
}

/// Authors manage themselves; super admins manage everyone
fn ensure_can_manage(ctx: &GraphQLContext, author_id: AuthorId) -> FieldResult<()> {
    let is_self = ctx.current_author().is_some_and(|a| a.id == author_id);
    let is_admin = ctx.current_user().is_some_and(|u| u.role == SUPER_ADMIN_ROLE);

    if is_self || is_admin {
        Ok(())
    } else {
        Err(field_error("Not allowed to modify this author"))
    }
}
