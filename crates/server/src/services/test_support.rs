//! Fixtures for service unit tests.

use std::sync::Arc;

use uuid::Uuid;

use domain::{Rating, Store, User, UserRole};

use crate::infra::{
    MockRatingRepository, MockStoreRepository, MockUserRepository, RatingRepository,
    StoreRepository, UnitOfWork, UserRepository,
};

/// UnitOfWork over mock repositories; unset repositories reject every call
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    stores: Arc<MockStoreRepository>,
    ratings: Arc<MockRatingRepository>,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            stores: Arc::new(MockStoreRepository::new()),
            ratings: Arc::new(MockRatingRepository::new()),
        }
    }

    pub fn with_users(mut self, users: MockUserRepository) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_stores(mut self, stores: MockStoreRepository) -> Self {
        self.stores = Arc::new(stores);
        self
    }

    pub fn with_ratings(mut self, ratings: MockRatingRepository) -> Self {
        self.ratings = Arc::new(ratings);
        self
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn stores(&self) -> Arc<dyn StoreRepository> {
        self.stores.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.ratings.clone()
    }
}

pub fn sample_user(email: &str, role: UserRole) -> User {
    User::new(
        "Sample Account Holder Name".to_string(),
        email.to_string(),
        "hashed".to_string(),
        "12 Sample Avenue, Sampletown".to_string(),
        role,
    )
}

pub fn sample_store(name: &str, owner_id: Uuid) -> Store {
    Store::new(name.to_string(), "7 High Street, Sampletown".to_string(), owner_id)
}

pub fn sample_rating(value: i32, user_id: Uuid, store_id: Uuid) -> Rating {
    Rating {
        id: Uuid::new_v4(),
        rating: value,
        user_id,
        store_id,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}
