use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{AuthorId, PostId};

/// Post model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub author_id: AuthorId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Find a post only if it belongs to the given author
    pub async fn find_for_author(
        author_id: AuthorId,
        id: PostId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Posts by an author, newest first, with the author's total post count
    pub async fn find_by_author(
        author_id: AuthorId,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let posts = sqlx::query_as::<_, Self>(
            "SELECT * FROM posts
             WHERE author_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await?;

        Ok((posts, total))
    }

    pub async fn create(author_id: AuthorId, content: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO posts (id, author_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(PostId::new())
        .bind(author_id)
        .bind(content)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update content of a post owned by `author_id`
    pub async fn update_content(
        author_id: AuthorId,
        id: PostId,
        content: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE posts SET content = $3, updated_at = NOW()
             WHERE id = $1 AND author_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(author_id)
        .bind(content)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a post owned by `author_id`. Returns the deleted row, if any.
    pub async fn delete(author_id: AuthorId, id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "DELETE FROM posts WHERE id = $1 AND author_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(author_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
