//! Store repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::store::{self, ActiveModel, Entity as StoreEntity};
use common::{AppError, AppResult};
use domain::Store;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Store>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Store>>;

    /// Insert a new store; a duplicate name is a conflict
    async fn create(&self, store: Store) -> AppResult<Store>;

    /// List all stores ordered by name
    async fn list(&self) -> AppResult<Vec<Store>>;

    /// List the stores owned by `owner_id` ordered by name
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Store>>;

    async fn count(&self) -> AppResult<u64>;

    /// Remove every store (seed reset)
    async fn delete_all(&self) -> AppResult<u64>;
}

pub struct StoreCatalog {
    db: DatabaseConnection,
}

impl StoreCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreRepository for StoreCatalog {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Store>> {
        let result = StoreEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Store>> {
        let result = StoreEntity::find()
            .filter(store::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn create(&self, store: Store) -> AppResult<Store> {
        let active_model = ActiveModel {
            id: Set(store.id),
            name: Set(store.name),
            address: Set(store.address),
            owner_id: Set(store.owner_id),
            created_at: Set(store.created_at),
            updated_at: Set(store.updated_at),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Store with this name"))?;
        Ok(Store::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Store>> {
        let models = StoreEntity::find()
            .order_by_asc(store::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Store>> {
        let models = StoreEntity::find()
            .filter(store::Column::OwnerId.eq(owner_id))
            .order_by_asc(store::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        StoreEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = StoreEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected)
    }
}
