//! User domain edges - GraphQL entry points

pub mod query;

pub use query::*;
