use juniper::GraphQLObject;

/// Access token plus the refresh token that can renew it
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "LoginResponse")]
pub struct LoginResponse {
    pub token: String,
    /// Only issued to users; authors log in again instead
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "ChangePasswordResponse")]
pub struct ChangePasswordResponse {
    pub ok: bool,
}
