//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users and roles, stores, ratings and their summaries, the password
//! policy and the field validation rules.

pub mod constants;
pub mod error;
pub mod password;
pub mod rating;
pub mod store;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{validate_password_policy, Password, PASSWORD_POLICY_MESSAGE};
pub use rating::{Rating, RatingSummary, RATING_RANGE_MESSAGE};
pub use store::Store;
pub use user::{User, UserResponse, UserRole, UserSummary};
