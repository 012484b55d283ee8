//! Application state - Dependency injection container.

use std::sync::Arc;

use common::RateLimitConfig;

use crate::config::Config;
use crate::infra::{Database, HealthCheck, RateLimiter};
use crate::services::{
    AuthService, DashboardService, RatingService, ServiceContainer, Services, StoreService,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub store_service: Arc<dyn StoreService>,
    pub rating_service: Arc<dyn RatingService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Database probe for `/health`
    pub health: Arc<dyn HealthCheck>,
    /// Request counters for `/auth/*`
    pub rate_limiter: Arc<RateLimiter>,
    pub auth_rate_limit: RateLimitConfig,
}

impl AppState {
    /// Build every service on top of the database connection.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.jwt.clone());
        Self::from_container(&container, database, config.auth_rate_limit.clone())
    }

    /// Build state from any service container (used by tests with mocks).
    pub fn from_container(
        container: &dyn ServiceContainer,
        health: Arc<dyn HealthCheck>,
        auth_rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            store_service: container.stores(),
            rating_service: container.ratings(),
            dashboard_service: container.dashboard(),
            health,
            rate_limiter: Arc::new(RateLimiter::new()),
            auth_rate_limit,
        }
    }
}
