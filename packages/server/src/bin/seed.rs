//! Seed a development database with a super admin, a few authors and their posts.

use anyhow::{Context, Result};
use blog_core::common::auth::SUPER_ADMIN_ROLE;
use blog_core::config::Config;
use blog_core::domains::auth::password::hash_password;
use blog_core::domains::authors::models::{Author, CreateAuthor};
use blog_core::domains::posts::models::Post;
use blog_core::domains::users::models::{CreateUser, User};
use clap::Parser;
use sqlx::PgPool;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed the blog database with sample data")]
struct Args {
    /// Username for the super admin account
    #[arg(long, default_value = "admin")]
    admin_username: String,

    #[arg(long, default_value = "admin@example.com")]
    admin_email: String,

    /// Password shared by every seeded account
    #[arg(long, default_value = "password123")]
    password: String,

    /// Posts created per author
    #[arg(long, default_value_t = 3)]
    posts_per_author: usize,
}

const AUTHORS: &[(&str, &str, &str)] = &[
    ("Ada", "Lovelace", "ada@example.com"),
    ("Grace", "Hopper", "grace@example.com"),
    ("Edsger", "Dijkstra", "edsger@example.com"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    println!("✓ Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let password_hash = hash_password(&args.password).context("Failed to hash seed password")?;

    if User::find_by_username(&args.admin_username, &pool).await?.is_some() {
        println!("  ⊘ Admin '{}' already exists", args.admin_username);
    } else {
        let admin = User::create(
            CreateUser {
                first_name: Some("Site".to_string()),
                last_name: Some("Admin".to_string()),
                username: args.admin_username.clone(),
                email: args.admin_email.clone(),
                password_hash: password_hash.clone(),
                role: SUPER_ADMIN_ROLE.to_string(),
            },
            &pool,
        )
        .await
        .context("Failed to create admin user")?;
        println!("✓ Created admin {} ({})", admin.username, admin.id);
    }

    let mut created = 0;
    for (first_name, last_name, email) in AUTHORS {
        if Author::find_by_email(email, &pool).await?.is_some() {
            println!("  ⊘ Skipping author {} (already exists)", email);
            continue;
        }

        let author = Author::create(
            CreateAuthor {
                first_name: first_name.to_string(),
                last_name: Some(last_name.to_string()),
                email: email.to_string(),
                password_hash: password_hash.clone(),
            },
            &pool,
        )
        .await
        .with_context(|| format!("Failed to create author {}", email))?;

        for n in 1..=args.posts_per_author {
            let content = format!("Post #{} by {} {}", n, first_name, last_name);
            Post::create(author.id, &content, &pool).await?;
        }

        println!(
            "✓ Created author {} with {} posts",
            email, args.posts_per_author
        );
        created += 1;
    }

    println!("\nDone: {} new authors", created);
    Ok(())
}
