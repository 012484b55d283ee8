//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod rating_handler;
pub mod store_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{auth_routes, session_routes};
pub use rating_handler::rating_routes;
pub use store_handler::store_routes;
