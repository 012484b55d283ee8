//! Store service - store creation, listings with rating summaries, and
//! the per-store rating breakdown shown to owners.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Rating, RatingSummary, Store, User, UserRole, UserSummary};

use crate::infra::UnitOfWork;
use crate::types::{matches_filter, StoreListQuery, StoreSortField};

/// Data needed to create a store
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub owner_id: Uuid,
}

/// Store as shown in listings
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub owner: Option<UserSummary>,
    /// Mean of all ratings, null when unrated
    pub average_rating: Option<f64>,
    pub rating_count: u64,
    /// The caller's own rating of this store
    pub user_rating: Option<i32>,
    /// ID of the caller's own rating, needed to modify it
    pub rating_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// One rating in a store's breakdown
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreRatingEntry {
    pub id: Uuid,
    pub rating: i32,
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ratings of a single store with its summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreRatings {
    pub store_id: Uuid,
    pub store_name: String,
    pub average_rating: Option<f64>,
    pub rating_count: u64,
    pub ratings: Vec<StoreRatingEntry>,
}

/// Join stores with their owners, summaries and the viewer's own ratings.
pub(crate) fn build_store_views(
    stores: Vec<Store>,
    owners: &HashMap<Uuid, User>,
    summaries: &HashMap<Uuid, RatingSummary>,
    own_ratings: &HashMap<Uuid, Rating>,
) -> Vec<StoreView> {
    stores
        .into_iter()
        .map(|store| {
            let summary = summaries.get(&store.id).copied().unwrap_or_default();
            let own = own_ratings.get(&store.id);
            StoreView {
                owner: owners.get(&store.owner_id).map(UserSummary::from),
                average_rating: summary.average_rating,
                rating_count: summary.rating_count,
                user_rating: own.map(|r| r.rating),
                rating_id: own.map(|r| r.id),
                id: store.id,
                name: store.name,
                address: store.address,
                created_at: store.created_at,
            }
        })
        .collect()
}

fn owner_email(view: &StoreView) -> &str {
    view.owner.as_ref().map(|o| o.email.as_str()).unwrap_or("")
}

fn compare_views(a: &StoreView, b: &StoreView, field: StoreSortField) -> Ordering {
    match field {
        StoreSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        StoreSortField::Email => owner_email(a).cmp(owner_email(b)),
        StoreSortField::Address => a.address.to_lowercase().cmp(&b.address.to_lowercase()),
        StoreSortField::Rating => a
            .average_rating
            .unwrap_or(0.0)
            .total_cmp(&b.average_rating.unwrap_or(0.0)),
        StoreSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
pub trait StoreService: Send + Sync {
    /// Create a store for an existing store owner
    async fn create_store(&self, new_store: NewStore) -> AppResult<Store>;

    /// List stores with summaries; `viewer_id` adds the viewer's own ratings
    async fn list_stores(
        &self,
        query: StoreListQuery,
        viewer_id: Option<Uuid>,
    ) -> AppResult<Vec<StoreView>>;

    /// Stores owned by `owner_id`
    async fn list_owned_stores(&self, owner_id: Uuid) -> AppResult<Vec<StoreView>>;

    /// Ratings of one store, visible to its owner and to admins
    async fn store_ratings(
        &self,
        store_id: Uuid,
        requester_id: Uuid,
        requester_role: UserRole,
    ) -> AppResult<StoreRatings>;
}

pub struct StoreManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StoreManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owners_of(&self, stores: &[Store]) -> AppResult<HashMap<Uuid, User>> {
        let ids: HashSet<Uuid> = stores.iter().map(|s| s.owner_id).collect();
        let owners = self.uow.users().find_by_ids(ids.into_iter().collect()).await?;
        Ok(owners.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> StoreService for StoreManager<U> {
    async fn create_store(&self, new_store: NewStore) -> AppResult<Store> {
        let name = new_store.name.trim().to_string();

        if self.uow.stores().find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Store with this name"));
        }

        let owner = self
            .uow
            .users()
            .find_by_id(new_store.owner_id)
            .await?
            .ok_or_not_found("Owner")?;

        if !owner.is_store_owner() {
            tracing::warn!(user_id = %owner.id, "Store creation rejected: user is not a store owner");
            return Err(AppError::bad_request("User is not a store owner"));
        }

        let store = Store::new(name, new_store.address.trim().to_string(), owner.id);
        let store = self.uow.stores().create(store).await?;
        tracing::info!(store_id = %store.id, owner_id = %store.owner_id, "Store created");
        Ok(store)
    }

    async fn list_stores(
        &self,
        query: StoreListQuery,
        viewer_id: Option<Uuid>,
    ) -> AppResult<Vec<StoreView>> {
        let stores_repo = self.uow.stores();
        let ratings_repo = self.uow.ratings();
        let (stores, summaries) = tokio::try_join!(stores_repo.list(), ratings_repo.summaries())?;

        let own_ratings: HashMap<Uuid, Rating> = match viewer_id {
            Some(user_id) => ratings_repo
                .list_by_user(user_id)
                .await?
                .into_iter()
                .map(|r| (r.store_id, r))
                .collect(),
            None => HashMap::new(),
        };

        let owners = self.owners_of(&stores).await?;
        let mut views: Vec<StoreView> = build_store_views(stores, &owners, &summaries, &own_ratings)
            .into_iter()
            .filter(|v| {
                matches_filter(&v.name, query.search.as_deref())
                    || matches_filter(&v.address, query.search.as_deref())
            })
            .filter(|v| matches_filter(&v.name, query.name.as_deref()))
            .filter(|v| matches_filter(&v.address, query.address.as_deref()))
            .filter(|v| matches_filter(owner_email(v), query.email.as_deref()))
            .collect();

        let field = query.sort_by.unwrap_or_default();
        let order = query.order.unwrap_or_default();
        views.sort_by(|a, b| order.apply(compare_views(a, b, field)));

        Ok(views)
    }

    async fn list_owned_stores(&self, owner_id: Uuid) -> AppResult<Vec<StoreView>> {
        let stores_repo = self.uow.stores();
        let ratings_repo = self.uow.ratings();
        let (stores, summaries) = tokio::try_join!(
            stores_repo.list_by_owner(owner_id),
            ratings_repo.summaries()
        )?;

        let owners = self.owners_of(&stores).await?;
        Ok(build_store_views(stores, &owners, &summaries, &HashMap::new()))
    }

    async fn store_ratings(
        &self,
        store_id: Uuid,
        requester_id: Uuid,
        requester_role: UserRole,
    ) -> AppResult<StoreRatings> {
        let store = self
            .uow
            .stores()
            .find_by_id(store_id)
            .await?
            .ok_or_not_found("Store")?;

        if !requester_role.is_admin() && !store.is_owned_by(requester_id) {
            tracing::warn!(store_id = %store.id, user_id = %requester_id, "Store ratings access denied");
            return Err(AppError::forbidden("You can only view ratings of your own store"));
        }

        let ratings = self.uow.ratings().list_by_store(store.id).await?;
        let summary = RatingSummary::from_ratings(
            &ratings.iter().map(|r| r.rating).collect::<Vec<_>>(),
        );

        let rater_ids: HashSet<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let raters: HashMap<Uuid, User> = self
            .uow
            .users()
            .find_by_ids(rater_ids.into_iter().collect())
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let entries = ratings
            .into_iter()
            .map(|r| StoreRatingEntry {
                id: r.id,
                rating: r.rating,
                user: raters.get(&r.user_id).map(UserSummary::from),
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect();

        Ok(StoreRatings {
            store_id: store.id,
            store_name: store.name,
            average_rating: summary.average_rating,
            rating_count: summary.rating_count,
            ratings: entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
    use crate::services::test_support::{sample_rating, sample_store, sample_user, TestUnitOfWork};
    use crate::types::SortOrder;
    use mockall::predicate::eq;

    fn manager(uow: TestUnitOfWork) -> StoreManager<TestUnitOfWork> {
        StoreManager::new(Arc::new(uow))
    }

    fn new_store(owner_id: Uuid) -> NewStore {
        NewStore {
            name: "  Fresh Market ".into(),
            address: "3 Harbour Road, Port Town".into(),
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_create_store_success() {
        let owner = sample_user("owner@example.com", UserRole::StoreOwner);
        let owner_id = owner.id;

        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_name()
            .withf(|name: &str| name == "Fresh Market")
            .returning(|_| Ok(None));
        stores.expect_create().returning(|store| Ok(store));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(owner_id))
            .returning(move |_| Ok(Some(owner.clone())));

        let service = manager(TestUnitOfWork::new().with_stores(stores).with_users(users));
        let store = service.create_store(new_store(owner_id)).await.unwrap();

        assert_eq!(store.name, "Fresh Market");
        assert!(store.is_owned_by(owner_id));
    }

    #[tokio::test]
    async fn test_create_store_duplicate_name() {
        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_name()
            .returning(|name| Ok(Some(sample_store(name, Uuid::new_v4()))));
        stores.expect_create().never();

        let service = manager(TestUnitOfWork::new().with_stores(stores));
        let err = service.create_store(new_store(Uuid::new_v4())).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_store_unknown_owner() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_name().returning(|_| Ok(None));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(TestUnitOfWork::new().with_stores(stores).with_users(users));
        let err = service.create_store(new_store(Uuid::new_v4())).await.unwrap_err();

        assert_eq!(err.to_string(), "Owner not found");
    }

    #[tokio::test]
    async fn test_create_store_requires_store_owner_role() {
        let user = sample_user("plain@example.com", UserRole::User);
        let user_id = user.id;

        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_name().returning(|_| Ok(None));
        stores.expect_create().never();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let service = manager(TestUnitOfWork::new().with_stores(stores).with_users(users));
        let err = service.create_store(new_store(user_id)).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "User is not a store owner");
    }

    #[tokio::test]
    async fn test_list_stores_includes_summary_and_own_rating() {
        let owner = sample_user("owner@example.com", UserRole::StoreOwner);
        let viewer = Uuid::new_v4();
        let rated = sample_store("Alpha Books", owner.id);
        let unrated = sample_store("Beta Bakes", owner.id);
        let own = sample_rating(4, viewer, rated.id);
        let (rated_id, unrated_id, own_id) = (rated.id, unrated.id, own.id);

        let mut stores = MockStoreRepository::new();
        stores
            .expect_list()
            .returning(move || Ok(vec![unrated.clone(), rated.clone()]));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_summaries().returning(move || {
            Ok(HashMap::from([(rated_id, RatingSummary::new(Some(4.5), 2))]))
        });
        ratings
            .expect_list_by_user()
            .with(eq(viewer))
            .returning(move |_| Ok(vec![own.clone()]));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![owner.clone()]));

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(stores)
                .with_ratings(ratings)
                .with_users(users),
        );
        let views = service
            .list_stores(StoreListQuery::default(), Some(viewer))
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, rated_id);
        assert_eq!(views[0].average_rating, Some(4.5));
        assert_eq!(views[0].user_rating, Some(4));
        assert_eq!(views[0].rating_id, Some(own_id));
        assert_eq!(views[0].owner.as_ref().unwrap().email, "owner@example.com");

        assert_eq!(views[1].id, unrated_id);
        assert_eq!(views[1].average_rating, None);
        assert_eq!(views[1].rating_count, 0);
        assert_eq!(views[1].user_rating, None);
    }

    #[tokio::test]
    async fn test_list_stores_search_and_sort_by_rating() {
        let owner_id = Uuid::new_v4();
        let a = sample_store("Corner Shop", owner_id);
        let b = sample_store("Corner Cafe", owner_id);
        let c = sample_store("Book Nook", owner_id);
        let (a_id, b_id) = (a.id, b.id);

        let mut stores = MockStoreRepository::new();
        stores
            .expect_list()
            .returning(move || Ok(vec![a.clone(), b.clone(), c.clone()]));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_summaries().returning(move || {
            Ok(HashMap::from([
                (a_id, RatingSummary::new(Some(2.0), 1)),
                (b_id, RatingSummary::new(Some(5.0), 1)),
            ]))
        });
        ratings.expect_list_by_user().never();
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().returning(|_| Ok(vec![]));

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(stores)
                .with_ratings(ratings)
                .with_users(users),
        );
        let views = service
            .list_stores(
                StoreListQuery {
                    search: Some("corner".into()),
                    sort_by: Some(StoreSortField::Rating),
                    order: Some(SortOrder::Desc),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let ids: Vec<Uuid> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![b_id, a_id]);
    }

    #[tokio::test]
    async fn test_store_ratings_for_owner() {
        let owner_id = Uuid::new_v4();
        let store = sample_store("Owner Mart", owner_id);
        let store_id = store.id;
        let rater = sample_user("rater@example.com", UserRole::User);
        let rater_id = rater.id;

        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_id()
            .returning(move |_| Ok(Some(store.clone())));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_list_by_store().returning(move |id| {
            Ok(vec![
                sample_rating(5, rater_id, id),
                sample_rating(2, Uuid::new_v4(), id),
            ])
        });
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![rater.clone()]));

        let service = manager(
            TestUnitOfWork::new()
                .with_stores(stores)
                .with_ratings(ratings)
                .with_users(users),
        );
        let result = service
            .store_ratings(store_id, owner_id, UserRole::StoreOwner)
            .await
            .unwrap();

        assert_eq!(result.rating_count, 2);
        assert_eq!(result.average_rating, Some(3.5));
        assert_eq!(result.ratings[0].user.as_ref().unwrap().id, rater_id);
        assert!(result.ratings[1].user.is_none());
    }

    #[tokio::test]
    async fn test_store_ratings_forbidden_for_other_owner() {
        let store = sample_store("Owner Mart", Uuid::new_v4());
        let store_id = store.id;

        let mut stores = MockStoreRepository::new();
        stores
            .expect_find_by_id()
            .returning(move |_| Ok(Some(store.clone())));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_list_by_store().never();

        let service = manager(TestUnitOfWork::new().with_stores(stores).with_ratings(ratings));
        let err = service
            .store_ratings(store_id, Uuid::new_v4(), UserRole::StoreOwner)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_store_ratings_missing_store() {
        let mut stores = MockStoreRepository::new();
        stores.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(TestUnitOfWork::new().with_stores(stores));
        let err = service
            .store_ratings(Uuid::new_v4(), Uuid::new_v4(), UserRole::Admin)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
