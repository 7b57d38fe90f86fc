// GraphQL schema and context
pub mod context;
pub mod schema;
pub mod util;

pub use context::*;
pub use schema::*;
