//! Application configuration module
//!
//! Handles environment variables and server-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
