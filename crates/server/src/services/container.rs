//! Service container - one handle to every application service.

use std::sync::Arc;

use common::JwtConfig;
use sea_orm::DatabaseConnection;

use super::{
    AuthService, Authenticator, Dashboard, DashboardService, RatingManager, RatingService,
    StoreManager, StoreService, UserManager, UserService,
};
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn stores(&self) -> Arc<dyn StoreService>;

    fn ratings(&self) -> Arc<dyn RatingService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    store_service: Arc<dyn StoreService>,
    rating_service: Arc<dyn RatingService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        store_service: Arc<dyn StoreService>,
        rating_service: Arc<dyn RatingService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            store_service,
            rating_service,
            dashboard_service,
        }
    }

    /// Wire every service over a shared unit of work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, jwt: JwtConfig) -> Self {
        Self::new(
            Arc::new(Authenticator::new(uow.clone(), jwt)),
            Arc::new(UserManager::new(uow.clone())),
            Arc::new(StoreManager::new(uow.clone())),
            Arc::new(RatingManager::new(uow.clone())),
            Arc::new(Dashboard::new(uow)),
        )
    }

    /// Create service container from database connection and JWT settings
    pub fn from_connection(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), jwt)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn stores(&self) -> Arc<dyn StoreService> {
        self.store_service.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
