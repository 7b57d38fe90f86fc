use juniper::FieldResult;
use tracing::error;

use crate::common::AuthorId;
use crate::domains::authors::data::{AuthorData, AuthorsPayload};
use crate::domains::authors::models::Author;
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::{field_error, parse_id};

pub async fn author(ctx: &GraphQLContext, id: String) -> FieldResult<Option<AuthorData>> {
    let author_id: AuthorId = parse_id(&id, "author id")?;

    let author = Author::find_by_id(author_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(author_id = %author_id, error = %e, "Failed to load author");
            field_error("Failed to load author")
        })?;

    Ok(author.map(AuthorData::from))
}

pub async fn authors(
    ctx: &GraphQLContext,
    limit: Option<i32>,
    offset: Option<i32>,
) -> FieldResult<AuthorsPayload> {
    let limit = limit.unwrap_or(20).clamp(1, 100);
    let offset = offset.unwrap_or(0).max(0);

    let (authors, total) = Author::find_all(limit as i64, offset as i64, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list authors");
            field_error("Failed to list authors")
        })?;

    Ok(AuthorsPayload {
        authors: authors.into_iter().map(AuthorData::from).collect(),
        total: total as i32,
    })
}
