//! Rating handlers.

use axum::{
    extract::State,
    routing::{get, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::Rating;

use crate::api::extractors::{AppPath, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::services::RatingView;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub store_id: Uuid,
    /// Range checked by the rating service, after the caller's role
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRatingRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
}

/// Rating as returned after submit or update
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: Uuid,
    pub rating: i32,
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id,
            rating: r.rating,
            user_id: r.user_id,
            store_id: r.store_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(submit_rating))
        .route("/:id", put(update_rating))
}

/// Rate a store
#[utoipa::path(
    post,
    path = "/ratings",
    tag = "Ratings",
    request_body = SubmitRatingRequest,
    responses(
        (status = 201, description = "Rating submitted", body = RatingResponse),
        (status = 400, description = "Out of range or own store"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Role may not rate"),
        (status = 404, description = "Store not found"),
        (status = 409, description = "Rating already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SubmitRatingRequest>,
) -> AppResult<Created<RatingResponse>> {
    let rating = state
        .rating_service
        .submit_rating(current_user.id, current_user.role, payload.store_id, payload.rating)
        .await?;

    Ok(Created(rating.into()))
}

/// Change the value of an own rating
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    tag = "Ratings",
    params(("id" = Uuid, Path, description = "Rating ID")),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 400, description = "Out of range"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Rating not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_rating(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRatingRequest>,
) -> AppResult<ApiResponse<RatingResponse>> {
    let rating = state
        .rating_service
        .update_rating(current_user.id, id, payload.rating)
        .await?;

    Ok(ApiResponse::success(rating.into()))
}

/// Every rating with user and store (admin)
#[utoipa::path(
    get,
    path = "/ratings",
    tag = "Ratings",
    responses(
        (status = 200, description = "All ratings", body = [RatingView]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<ApiResponse<Vec<RatingView>>> {
    require_admin(&current_user)?;

    let ratings = state.rating_service.list_ratings().await?;
    Ok(ApiResponse::success(ratings))
}
