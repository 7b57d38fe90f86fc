pub mod data;
pub mod edges;
pub mod jwt;
pub mod password;

pub use jwt::{generate_refresh_token, JwtService, TokenClaims};
