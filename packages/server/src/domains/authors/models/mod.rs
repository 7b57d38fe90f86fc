pub mod author;

pub use author::{Author, CreateAuthor, UpdateAuthor};
