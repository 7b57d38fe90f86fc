use juniper::FieldResult;
use tracing::error;

use crate::common::{AuthorId, PostId};
use crate::domains::posts::data::{PostData, PostsPayload};
use crate::domains::posts::models::Post;
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::{field_error, parse_id};

/// A post owned by the requesting author
pub async fn post_by_id(ctx: &GraphQLContext, id: String) -> FieldResult<Option<PostData>> {
    let author = ctx.require_author()?;
    let post_id: PostId = parse_id(&id, "post id")?;

    let post = Post::find_for_author(author.id, post_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(post_id = %post_id, error = %e, "Failed to load post");
            field_error("Failed to load post")
        })?;

    Ok(post.map(PostData::from))
}

pub async fn all_post_by_author(
    ctx: &GraphQLContext,
    author_id: String,
    limit: Option<i32>,
    offset: Option<i32>,
) -> FieldResult<PostsPayload> {
    let author_id: AuthorId = parse_id(&author_id, "author id")?;
    let limit = limit.unwrap_or(20).clamp(1, 100);
    let offset = offset.unwrap_or(0).max(0);

    let (posts, total) = Post::find_by_author(author_id, limit as i64, offset as i64, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(author_id = %author_id, error = %e, "Failed to list posts");
            field_error("Failed to list posts")
        })?;

    Ok(PostsPayload {
        posts: posts.into_iter().map(PostData::from).collect(),
        total: total as i32,
    })
}
