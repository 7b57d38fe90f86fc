use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};

use crate::domains::posts::models::Post;

#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(name = "Post")]
pub struct PostData {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "PostsPayload")]
pub struct PostsPayload {
    pub posts: Vec<PostData>,
    pub total: i32,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(name = "PostCreateInput")]
pub struct PostCreateInput {
    pub content: String,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(name = "PostUpdateInput")]
pub struct PostUpdateInput {
    pub id: String,
    pub content: String,
}
