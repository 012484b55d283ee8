//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM entities and repositories
//! - Unit of Work for repository access
//! - In-process rate limiter

pub mod db;
pub mod rate_limiter;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, HealthCheck, Migrator};
pub use rate_limiter::{RateLimitDecision, RateLimiter};
pub use repositories::{
    RatingLedger, RatingRepository, StoreCatalog, StoreRepository, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockRatingRepository, MockStoreRepository, MockUserRepository};
