// Blog Server - API Core
//
// GraphQL backend exposing authors, posts and users. Every GraphQL operation
// passes through the authorization gate in common::auth before juniper
// executes any resolver.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
