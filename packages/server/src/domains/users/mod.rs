//! User domain - back-office accounts, the only principals that can be super admins

pub mod data;
pub mod edges;
pub mod models;

pub use data::UserData;
pub use models::User;
