//! Author domain - people who write posts and sign in with their own tokens

pub mod data;
pub mod edges;
pub mod models;

pub use data::AuthorData;
pub use models::Author;
