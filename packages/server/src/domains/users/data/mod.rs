use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::users::models::User;

/// User GraphQL data type
///
/// Never exposes the password hash or refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(name = "User", description = "A back-office user account")]
pub struct UserData {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

/// A page of users plus the total count
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "UsersPayload")]
pub struct UsersPayload {
    pub users: Vec<UserData>,
    pub total: i32,
}
