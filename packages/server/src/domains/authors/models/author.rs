use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::AuthorId;

/// Author model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Author {
    pub async fn find_by_id(id: AuthorId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM authors WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Authors ordered by name, with the total row count
    pub async fn find_all(limit: i64, offset: i64, pool: &PgPool) -> Result<(Vec<Self>, i64)> {
        let authors = sqlx::query_as::<_, Self>(
            "SELECT * FROM authors ORDER BY first_name, last_name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(pool)
            .await?;

        Ok((authors, total))
    }

    pub async fn create(input: CreateAuthor, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO authors (id, first_name, last_name, email, password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(AuthorId::new())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: AuthorId, input: UpdateAuthor, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE authors
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete an author (posts cascade). Returns the deleted row, if any.
    pub async fn delete(id: AuthorId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("DELETE FROM authors WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
