//! Admin handlers - user and store management plus the dashboard.
//!
//! Every route here sits behind `admin_guard`.

use axum::{
    extract::State,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{UserResponse, UserRole};

use crate::api::extractors::{rules, AppPath, AppQuery, ValidatedJson};
use crate::api::AppState;
use crate::services::{DashboardStats, NewStore, NewUser, StoreView, UserDetail};
use crate::types::{ApiResponse, Created, StoreListQuery, UserListQuery};

/// Admin user creation; any role may be assigned
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "rules::user_name"))]
    #[schema(example = "Margaret Eleanor Thompson")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "owner@example.com")]
    pub email: String,
    #[validate(custom(function = "rules::password"))]
    #[schema(example = "Owner@Pass1")]
    pub password: String,
    #[validate(custom(function = "rules::user_address"))]
    #[schema(example = "14 Market Street, Springfield")]
    pub address: String,
    /// USER, ADMIN or STORE_OWNER; defaults to USER
    #[schema(example = "STORE_OWNER")]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[validate(custom(function = "rules::store_name"))]
    #[schema(example = "Corner Bookshop")]
    pub name: String,
    #[validate(custom(function = "rules::store_address"))]
    #[schema(example = "3 Harbour Road, Port Town")]
    pub address: String,
    /// Must reference a STORE_OWNER account
    pub owner_id: Uuid,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/stores", get(list_stores).post(create_store))
        .route("/dashboard", get(dashboard))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Admin",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let role = match payload.role.as_deref().map(str::trim) {
        None | Some("") => UserRole::User,
        Some(role) => role.parse::<UserRole>()?,
    };

    let user = state
        .user_service
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            address: payload.address,
            role,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// List users with filters and sorting
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    params(UserListQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 400, description = "Unknown role filter"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserListQuery>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list_users(query).await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// User detail; store owners include their stores
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = UserDetail),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<ApiResponse<UserDetail>> {
    let detail = state.user_service.get_user_detail(id).await?;
    Ok(ApiResponse::success(detail))
}

/// Create a store for a store owner
#[utoipa::path(
    post,
    path = "/admin/stores",
    tag = "Admin",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = StoreView),
        (status = 400, description = "Validation error or owner lacks STORE_OWNER role"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Store name taken")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_store(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStoreRequest>,
) -> AppResult<Created<StoreView>> {
    let store = state
        .store_service
        .create_store(NewStore {
            name: payload.name,
            address: payload.address,
            owner_id: payload.owner_id,
        })
        .await?;

    let owner = state.user_service.get_user(store.owner_id).await?;
    Ok(Created(StoreView {
        id: store.id,
        name: store.name,
        address: store.address,
        owner: Some((&owner).into()),
        average_rating: None,
        rating_count: 0,
        user_rating: None,
        rating_id: None,
        created_at: store.created_at,
    }))
}

/// All stores with owner and rating summary
#[utoipa::path(
    get,
    path = "/admin/stores",
    tag = "Admin",
    params(StoreListQuery),
    responses(
        (status = 200, description = "Matching stores", body = [StoreView]),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_stores(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StoreListQuery>,
) -> AppResult<ApiResponse<Vec<StoreView>>> {
    let stores = state.store_service.list_stores(query, None).await?;
    Ok(ApiResponse::success(stores))
}

/// Platform totals
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "Admin",
    responses(
        (status = 200, description = "Totals", body = DashboardStats),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardStats>> {
    let stats = state.dashboard_service.stats().await?;
    Ok(ApiResponse::success(stats))
}
