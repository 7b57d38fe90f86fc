use juniper::FieldResult;
use tracing::{error, info};

use crate::common::PostId;
use crate::domains::posts::data::{PostCreateInput, PostData, PostUpdateInput};
use crate::domains::posts::models::Post;
use crate::server::graphql::context::GraphQLContext;
use crate::server::graphql::util::{field_error, parse_id};

/// Publish a post as the requesting author
pub async fn create_post(ctx: &GraphQLContext, input: PostCreateInput) -> FieldResult<PostData> {
    let author = ctx.require_author()?;
    let content = non_blank(&input.content)?;

    let post = Post::create(author.id, content, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(author_id = %author.id, error = %e, "Failed to insert post");
            field_error("Failed to create post")
        })?;

    info!(post_id = %post.id, author_id = %author.id, "Post created");
    Ok(post.into())
}

pub async fn update_post(ctx: &GraphQLContext, input: PostUpdateInput) -> FieldResult<PostData> {
    let author = ctx.require_author()?;
    let post_id: PostId = parse_id(&input.id, "post id")?;
    let content = non_blank(&input.content)?;

    let post = Post::update_content(author.id, post_id, content, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(post_id = %post_id, error = %e, "Failed to update post");
            field_error("Failed to update post")
        })?
        .ok_or_else(|| field_error("Post not found"))?;

    Ok(post.into())
}

pub async fn delete_post(ctx: &GraphQLContext, id: String) -> FieldResult<PostData> {
    let author = ctx.require_author()?;
    let post_id: PostId = parse_id(&id, "post id")?;

    let post = Post::delete(author.id, post_id, &ctx.db_pool)
        .await
        .map_err(|e| {
            error!(post_id = %post_id, error = %e, "Failed to delete post");
            field_error("Failed to delete post")
        })?
        .ok_or_else(|| field_error("no post deleted"))?;

    info!(post_id = %post_id, "Post deleted");
    Ok(post.into())
}

fn non_blank(content: &str) -> FieldResult<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(field_error("Post content must not be empty"));
    }
    Ok(trimmed)
}
