//! Rating repository implementation, including the per-store aggregates.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::rating::{self, ActiveModel, Entity as RatingEntity};
use common::{AppError, AppResult};
use domain::{Rating, RatingSummary};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rating>>;

    /// The single rating `user_id` gave `store_id`, if any
    async fn find_by_user_and_store(&self, user_id: Uuid, store_id: Uuid)
        -> AppResult<Option<Rating>>;

    /// Insert a new rating; a second rating for the same (user, store) is a conflict
    async fn create(&self, rating: Rating) -> AppResult<Rating>;

    /// Change the value of an existing rating
    async fn update_value(&self, id: Uuid, value: i32) -> AppResult<Rating>;

    /// List all ratings, newest first
    async fn list(&self) -> AppResult<Vec<Rating>>;

    async fn list_by_store(&self, store_id: Uuid) -> AppResult<Vec<Rating>>;

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>>;

    /// Average and count for every store that has at least one rating
    async fn summaries(&self) -> AppResult<HashMap<Uuid, RatingSummary>>;

    async fn count(&self) -> AppResult<u64>;

    /// Remove every rating (seed reset)
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Row of the `GROUP BY store_id` aggregate
#[derive(Debug, FromQueryResult)]
struct StoreAggregate {
    store_id: Uuid,
    average_rating: Option<f64>,
    rating_count: i64,
}

impl From<StoreAggregate> for RatingSummary {
    fn from(row: StoreAggregate) -> Self {
        RatingSummary::new(row.average_rating, row.rating_count.max(0) as u64)
    }
}

fn aggregate_query() -> Select<RatingEntity> {
    let average = SimpleExpr::from(Func::cast_as(
        Func::avg(Expr::col(rating::Column::Rating)),
        Alias::new("double precision"),
    ));

    RatingEntity::find()
        .select_only()
        .column(rating::Column::StoreId)
        .column_as(average, "average_rating")
        .column_as(Expr::col(rating::Column::Id).count(), "rating_count")
        .group_by(rating::Column::StoreId)
}

pub struct RatingLedger {
    db: DatabaseConnection,
}

impl RatingLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingLedger {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rating>> {
        let result = RatingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Rating::from))
    }

    async fn find_by_user_and_store(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> AppResult<Option<Rating>> {
        let result = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Rating::from))
    }

    async fn create(&self, rating: Rating) -> AppResult<Rating> {
        let active_model = ActiveModel {
            id: Set(rating.id),
            rating: Set(rating.rating),
            user_id: Set(rating.user_id),
            store_id: Set(rating.store_id),
            created_at: Set(rating.created_at),
            updated_at: Set(rating.updated_at),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Rating"))?;
        Ok(Rating::from(model))
    }

    async fn update_value(&self, id: Uuid, value: i32) -> AppResult<Rating> {
        let model = RatingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Rating"))?;

        let mut active: ActiveModel = model.into();
        active.rating = Set(value);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Rating::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn list_by_store(&self, store_id: Uuid) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .filter(rating::Column::StoreId.eq(store_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn summaries(&self) -> AppResult<HashMap<Uuid, RatingSummary>> {
        let rows = aggregate_query()
            .into_model::<StoreAggregate>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.store_id, RatingSummary::from(row)))
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        RatingEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = RatingEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected)
    }
}
