//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;

pub use deps::{PgAuthorLookup, PgUserLookup, ServerDeps};
