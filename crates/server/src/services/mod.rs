//! Application services layer - use cases and business rules.
//!
//! Services depend on the [`UnitOfWork`](crate::infra::UnitOfWork) trait
//! for repository access and are exposed to handlers as trait objects.

mod auth_service;
pub mod container;
mod dashboard_service;
mod rating_service;
mod store_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse, Signup};
pub use dashboard_service::{Dashboard, DashboardService, DashboardStats};
pub use rating_service::{RatingManager, RatingService, RatingView, StoreSummary};
pub use store_service::{
    NewStore, StoreManager, StoreRatingEntry, StoreRatings, StoreService, StoreView,
};
pub use user_service::{normalize_email, NewUser, UserDetail, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
