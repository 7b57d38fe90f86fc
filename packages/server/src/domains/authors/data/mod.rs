use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};

use crate::domains::authors::models::Author;

#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(name = "Author", description = "Someone who writes posts")]
pub struct AuthorData {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Author> for AuthorData {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            first_name: author.first_name,
            last_name: author.last_name,
            email: author.email,
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "AuthorsPayload")]
pub struct AuthorsPayload {
    pub authors: Vec<AuthorData>,
    pub total: i32,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(name = "AuthorCreateInput")]
pub struct AuthorCreateInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, GraphQLInputObject)]
#[graphql(name = "AuthorUpdateInput")]
pub struct AuthorUpdateInput {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
