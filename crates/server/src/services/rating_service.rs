//! Rating service - submitting and modifying store ratings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Rating, Store, UserRole, UserSummary};

use crate::infra::UnitOfWork;

/// Minimal store reference embedded in rating listings
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

impl From<&Store> for StoreSummary {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
            address: store.address.clone(),
        }
    }
}

/// Rating with its author and store, as listed to admins
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: Uuid,
    pub rating: i32,
    pub user: Option<UserSummary>,
    pub store: Option<StoreSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait RatingService: Send + Sync {
    /// Rate a store once; USER and STORE_OWNER accounts only
    async fn submit_rating(
        &self,
        user_id: Uuid,
        role: UserRole,
        store_id: Uuid,
        value: i32,
    ) -> AppResult<Rating>;

    /// Change the value of the caller's own rating
    async fn update_rating(&self, user_id: Uuid, rating_id: Uuid, value: i32) -> AppResult<Rating>;

    /// Every rating with author and store
    async fn list_ratings(&self) -> AppResult<Vec<RatingView>>;
}

pub struct RatingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RatingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RatingService for RatingManager<U> {
    async fn submit_rating(
        &self,
        user_id: Uuid,
        role: UserRole,
        store_id: Uuid,
        value: i32,
    ) -> AppResult<Rating> {
        if !role.can_rate() {
            return Err(AppError::forbidden("Only users and store owners can rate stores"));
        }

        // Validates the value before any lookup
        let rating = Rating::new(value, user_id, store_id)?;

        let store = self
            .uow
            .stores()
            .find_by_id(store_id)
            .await?
            .ok_or_not_found("Store")?;

        if store.is_owned_by(user_id) {
            tracing::warn!(store_id = %store.id, user_id = %user_id, "Self-rating rejected");
            return Err(AppError::bad_request("You cannot rate your own store"));
        }

        if self
            .uow
            .ratings()
            .find_by_user_and_store(user_id, store_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Rating"));
        }

        let rating = self.uow.ratings().create(rating).await?;
        tracing::info!(rating_id = %rating.id, store_id = %store_id, value, "Rating submitted");
        Ok(rating)
    }

    async fn update_rating(&self, user_id: Uuid, rating_id: Uuid, value: i32) -> AppResult<Rating> {
        let mut rating = self
            .uow
            .ratings()
            .find_by_id(rating_id)
            .await?
            .ok_or_not_found("Rating")?;

        if !rating.is_authored_by(user_id) {
            return Err(AppError::forbidden("You can only modify your own rating"));
        }

        rating.update_value(value)?;
        let rating = self.uow.ratings().update_value(rating.id, rating.rating).await?;
        tracing::info!(rating_id = %rating.id, value, "Rating updated");
        Ok(rating)
    }

    async fn list_ratings(&self) -> AppResult<Vec<RatingView>> {
        let ratings_repo = self.uow.ratings();
        let users_repo = self.uow.users();
        let stores_repo = self.uow.stores();

        let (ratings, users, stores) =
            tokio::try_join!(ratings_repo.list(), users_repo.list(), stores_repo.list())?;

        let users: HashMap<Uuid, UserSummary> =
            users.iter().map(|u| (u.id, UserSummary::from(u))).collect();
        let stores: HashMap<Uuid, StoreSummary> =
            stores.iter().map(|s| (s.id, StoreSummary::from(s))).collect();

        Ok(ratings
            .into_iter()
            .map(|r| RatingView {
                id: r.id,
                rating: r.rating,
                user: users.get(&r.user_id).cloned(),
                store: stores.get(&r.store_id).cloned(),
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
    use crate::services::test_support::{sample_rating, sample_store, sample_user, TestUnitOfWork};
    use mockall::predicate::eq;

    fn manager(uow: TestUnitOfWork) -> RatingManager<TestUnitOfWork> {
        RatingManager::new(Arc::new(uow))
    }

    fn store_repo_with(store: Store) -> MockStoreRepository {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_id()
            .returning(move |_| Ok(Some(store.clone())));
        stores
    }

    // =========================================================================
    // Submit
    // =========================================================================

    #[tokio::test]
    async fn test_submit_rating_success() {
        let user_id = Uuid::new_v4();
        let store = sample_store("Corner Shop", Uuid::new_v4());
        let store_id = store.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find_by_user_and_store()
            .with(eq(user_id), eq(store_id))
            .returning(|_, _| Ok(None));
        ratings.expect_create().returning(|r| Ok(r));

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(store_repo_with(store))
                .with_ratings(ratings),
        );
        let rating = service
            .submit_rating(user_id, UserRole::User, store_id, 4)
            .await
            .unwrap();

        assert_eq!(rating.rating, 4);
        assert_eq!(rating.user_id, user_id);
        assert_eq!(rating.store_id, store_id);
    }

    #[tokio::test]
    async fn test_store_owner_can_rate_other_store() {
        let user_id = Uuid::new_v4();
        let store = sample_store("Corner Shop", Uuid::new_v4());
        let store_id = store.id;

        let mut ratings = MockRatingRepository::new();
        ratings.expect_find_by_user_and_store().returning(|_, _| Ok(None));
        ratings.expect_create().returning(|r| Ok(r));

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(store_repo_with(store))
                .with_ratings(ratings),
        );
        let result = service
            .submit_rating(user_id, UserRole::StoreOwner, store_id, 5)
            .await;

        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_admin_cannot_rate() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_id().never();

        let service = manager(TestUnitOfWork::new().with_stores(stores));
        for value in [3, 9] {
            let err = service
                .submit_rating(Uuid::new_v4(), UserRole::Admin, Uuid::new_v4(), value)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[tokio::test]
    async fn test_submit_rating_out_of_range() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_id().never();

        let service = manager(TestUnitOfWork::new().with_stores(stores));
        for value in [0, 6] {
            let err = service
                .submit_rating(Uuid::new_v4(), UserRole::User, Uuid::new_v4(), value)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_submit_rating_unknown_store() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(TestUnitOfWork::new().with_stores(stores));
        let err = service
            .submit_rating(Uuid::new_v4(), UserRole::User, Uuid::new_v4(), 3)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Store not found");
    }

    #[tokio::test]
    async fn test_cannot_rate_own_store() {
        let owner_id = Uuid::new_v4();
        let store = sample_store("Own Shop", owner_id);
        let store_id = store.id;

        let mut ratings = MockRatingRepository::new();
        ratings.expect_create().never();

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(store_repo_with(store))
                .with_ratings(ratings),
        );
        let err = service
            .submit_rating(owner_id, UserRole::StoreOwner, store_id, 5)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "You cannot rate your own store");
    }

    #[tokio::test]
    async fn test_duplicate_rating_conflicts() {
        let user_id = Uuid::new_v4();
        let store = sample_store("Corner Shop", Uuid::new_v4());
        let store_id = store.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find_by_user_and_store()
            .returning(|user, store| Ok(Some(sample_rating(3, user, store))));
        ratings.expect_create().never();

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(store_repo_with(store))
                .with_ratings(ratings),
        );
        let err = service
            .submit_rating(user_id, UserRole::User, store_id, 4)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Rating already exists");
    }

    // =========================================================================
    // Update
    // =========================================================================

    #[tokio::test]
    async fn test_update_own_rating() {
        let user_id = Uuid::new_v4();
        let existing = sample_rating(2, user_id, Uuid::new_v4());
        let rating_id = existing.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find_by_id()
            .with(eq(rating_id))
            .returning(move |_| Ok(Some(existing.clone())));
        ratings
            .expect_update_value()
            .with(eq(rating_id), eq(5))
            .returning(move |id, value| {
                let mut r = sample_rating(value, user_id, Uuid::new_v4());
                r.id = id;
                Ok(r)
            });

        let service = manager(TestUnitOfWork::new().with_ratings(ratings));
        let updated = service.update_rating(user_id, rating_id, 5).await.unwrap();

        assert_eq!(updated.id, rating_id);
        assert_eq!(updated.rating, 5);
    }

    #[tokio::test]
    async fn test_update_rating_of_someone_else() {
        let existing = sample_rating(2, Uuid::new_v4(), Uuid::new_v4());
        let rating_id = existing.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        ratings.expect_update_value().never();

        let service = manager(TestUnitOfWork::new().with_ratings(ratings));
        let err = service
            .update_rating(Uuid::new_v4(), rating_id, 4)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_missing_rating() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(TestUnitOfWork::new().with_ratings(ratings));
        let err = service
            .update_rating(Uuid::new_v4(), Uuid::new_v4(), 4)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rating_rejects_invalid_value() {
        let user_id = Uuid::new_v4();
        let existing = sample_rating(2, user_id, Uuid::new_v4());
        let rating_id = existing.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        ratings.expect_update_value().never();

        let service = manager(TestUnitOfWork::new().with_ratings(ratings));
        let err = service.update_rating(user_id, rating_id, 9).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[tokio::test]
    async fn test_list_ratings_joins_user_and_store() {
        let user = sample_user("rater@example.com", UserRole::User);
        let store = sample_store("Corner Shop", Uuid::new_v4());
        let rating = sample_rating(4, user.id, store.id);
        let orphan = sample_rating(1, Uuid::new_v4(), Uuid::new_v4());

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_list()
            .returning(move || Ok(vec![rating.clone(), orphan.clone()]));
        let mut users = MockUserRepository::new();
        users.expect_list().returning(move || Ok(vec![user.clone()]));
        let mut stores = MockStoreRepository::new();
        stores.expect_list().returning(move || Ok(vec![store.clone()]));

        let service = manager(
            TestUnitOfWork::new()
                .with_ratings(ratings)
                .with_users(users)
                .with_stores(stores),
        );
        let views = service.list_ratings().await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].user.as_ref().unwrap().email, "rater@example.com");
        assert_eq!(views[0].store.as_ref().unwrap().name, "Corner Shop");
        assert!(views[1].user.is_none());
        assert!(views[1].store.is_none());
    }
}
