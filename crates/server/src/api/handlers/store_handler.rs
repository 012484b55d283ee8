//! Store handlers for authenticated users and store owners.

use axum::{
    extract::State,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use common::AppResult;

use crate::api::extractors::{AppPath, AppQuery};
use crate::api::middleware::{require_store_owner, CurrentUser};
use crate::api::AppState;
use crate::services::{StoreRatings, StoreView};
use crate::types::{ApiResponse, StoreListQuery};

pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores))
        .route("/owned", get(owned_stores))
        .route("/:id/ratings", get(store_ratings))
}

/// Stores with summaries and the caller's own rating
#[utoipa::path(
    get,
    path = "/stores",
    tag = "Stores",
    params(StoreListQuery),
    responses(
        (status = 200, description = "Stores", body = [StoreView]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppQuery(query): AppQuery<StoreListQuery>,
) -> AppResult<ApiResponse<Vec<StoreView>>> {
    let stores = state
        .store_service
        .list_stores(query, Some(current_user.id))
        .await?;

    Ok(ApiResponse::success(stores))
}

/// Stores owned by the caller
#[utoipa::path(
    get,
    path = "/stores/owned",
    tag = "Stores",
    responses(
        (status = 200, description = "Owned stores", body = [StoreView]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "STORE_OWNER role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn owned_stores(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<ApiResponse<Vec<StoreView>>> {
    require_store_owner(&current_user)?;

    let stores = state.store_service.list_owned_stores(current_user.id).await?;
    Ok(ApiResponse::success(stores))
}

/// Ratings of a store, for its owner or an admin
#[utoipa::path(
    get,
    path = "/stores/{id}/ratings",
    tag = "Stores",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store ratings with summary", body = StoreRatings),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner of this store"),
        (status = 404, description = "Store not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn store_ratings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<ApiResponse<StoreRatings>> {
    let ratings = state
        .store_service
        .store_ratings(id, current_user.id, current_user.role)
        .await?;

    Ok(ApiResponse::success(ratings))
}
