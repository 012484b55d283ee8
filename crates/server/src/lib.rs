//! Store rating platform API.
//!
//! Admins manage users and stores, users rate stores from 1 to 5, and
//! store owners follow the ratings of their own stores.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Environment configuration and server constants
//! - **services**: Use cases over the repositories
//! - **infra**: Database, migrations, repositories, rate limiter
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Response envelope and list queries
//!
//! Domain types live in the `domain` crate, errors and shared config in
//! `common`.
//!
//! # CLI Usage
//!
//! ```bash
//! store-rating serve
//! store-rating migrate up
//! store-rating seed --reset
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
