//! Post domain - content written by authors

pub mod data;
pub mod edges;
pub mod models;

pub use data::PostData;
pub use models::Post;
