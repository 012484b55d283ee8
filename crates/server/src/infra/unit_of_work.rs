//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of individual repositories, so a
//! single handle gives them users, stores and ratings.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    RatingLedger, RatingRepository, StoreCatalog, StoreRepository, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn stores(&self) -> Arc<dyn StoreRepository>;

    fn ratings(&self) -> Arc<dyn RatingRepository>;
}

/// Concrete implementation of UnitOfWork backed by one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    store_repo: Arc<StoreCatalog>,
    rating_repo: Arc<RatingLedger>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            store_repo: Arc::new(StoreCatalog::new(db.clone())),
            rating_repo: Arc::new(RatingLedger::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn stores(&self) -> Arc<dyn StoreRepository> {
        self.store_repo.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.rating_repo.clone()
    }
}
