//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Emails and usernames get a
//! random suffix because all tests share one database.

use anyhow::Result;
use blog_core::domains::auth::password::hash_password;
use blog_core::domains::authors::models::{Author, CreateAuthor};
use blog_core::domains::posts::models::Post;
use blog_core::domains::users::models::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Create an active user with [`TEST_PASSWORD`]
pub async fn create_test_user(pool: &PgPool, role: &str) -> Result<User> {
    let username = unique("user");
    let user = User::create(
        CreateUser {
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            email: format!("{}@example.com", username),
            username,
            password_hash: hash_password(TEST_PASSWORD)?,
            role: role.to_string(),
        },
        pool,
    )
    .await?;

    Ok(user)
}

pub async fn deactivate_user(pool: &PgPool, user: &User) -> Result<()> {
    sqlx::query("UPDATE users SET active = false WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create an author with [`TEST_PASSWORD`]
pub async fn create_test_author(pool: &PgPool) -> Result<Author> {
    let author = Author::create(
        CreateAuthor {
            first_name: "Test".to_string(),
            last_name: Some("Author".to_string()),
            email: format!("{}@example.com", unique("author")),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
        pool,
    )
    .await?;

    Ok(author)
}

pub async fn create_test_post(pool: &PgPool, author: &Author, content: &str) -> Result<Post> {
    Post::create(author.id, content, pool).await
}
