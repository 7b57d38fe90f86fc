//! Typed ID definitions for all domain entities.

pub use super::id::Id;

/// Marker type for User entities (back-office accounts).
pub struct User;

/// Marker type for Author entities (people who write posts).
pub struct Author;

/// Marker type for Post entities.
pub struct Post;

pub type UserId = Id<User>;

pub type AuthorId = Id<Author>;

pub type PostId = Id<Post>;
