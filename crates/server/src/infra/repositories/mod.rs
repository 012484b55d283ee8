//! Repository layer - Data access abstraction
//!
//! Repositories translate between SeaORM entities and domain types and
//! are the only code that issues queries.

pub(crate) mod entities;
mod rating_repository;
mod store_repository;
mod user_repository;

pub use rating_repository::{RatingRepository, RatingLedger};
pub use store_repository::{StoreRepository, StoreCatalog};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use rating_repository::MockRatingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use store_repository::MockStoreRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
