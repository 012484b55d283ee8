//! Dashboard service - platform-wide totals for admins.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use common::AppResult;

use crate::infra::UnitOfWork;

/// Totals shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 16)]
    pub total_users: u64,
    #[schema(example = 10)]
    pub total_stores: u64,
    #[schema(example = 25)]
    pub total_ratings: u64,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;
}

pub struct Dashboard<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Dashboard<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for Dashboard<U> {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let users = self.uow.users();
        let stores = self.uow.stores();
        let ratings = self.uow.ratings();

        let (total_users, total_stores, total_ratings) =
            tokio::try_join!(users.count(), stores.count(), ratings.count())?;

        Ok(DashboardStats {
            total_users,
            total_stores,
            total_ratings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockRatingRepository, MockStoreRepository, MockUserRepository};
    use crate::services::test_support::TestUnitOfWork;
    use common::AppError;

    #[tokio::test]
    async fn test_stats_counts_everything() {
        let mut users = MockUserRepository::new();
        users.expect_count().returning(|| Ok(16));
        let mut stores = MockStoreRepository::new();
        stores.expect_count().returning(|| Ok(10));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_count().returning(|| Ok(25));

        let dashboard = Dashboard::new(Arc::new(
            TestUnitOfWork::new()
                .with_users(users)
                .with_stores(stores)
                .with_ratings(ratings),
        ));
        let stats = dashboard.stats().await.unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                total_users: 16,
                total_stores: 10,
                total_ratings: 25,
            }
        );

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalRatings"], 25);
    }

    #[tokio::test]
    async fn test_stats_propagates_errors() {
        let mut users = MockUserRepository::new();
        users.expect_count().returning(|| Err(AppError::internal("boom")));
        let mut stores = MockStoreRepository::new();
        stores.expect_count().returning(|| Ok(0));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_count().returning(|| Ok(0));

        let dashboard = Dashboard::new(Arc::new(
            TestUnitOfWork::new()
                .with_users(users)
                .with_stores(stores)
                .with_ratings(ratings),
        ));

        assert!(dashboard.stats().await.is_err());
    }
}
