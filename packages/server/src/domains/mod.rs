// Business domains
//
// Each domain owns its models (SQL), data (GraphQL types) and edges
// (resolver entry points).

pub mod auth;
pub mod authors;
pub mod posts;
pub mod users;
