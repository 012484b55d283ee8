//! Common utilities shared by the API server crates.
//!
//! This crate provides:
//! - The application error type and its HTTP mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
