//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use domain::{RatingSummary, UserResponse, UserRole, UserSummary};

use crate::api::handlers::{admin_handler, auth_handler, rating_handler, store_handler};
use crate::services::{
    DashboardStats, LoginResponse, RatingView, StoreRatingEntry, StoreRatings, StoreSummary,
    StoreView, UserDetail,
};
use crate::types::{MessageResponse, SortOrder, StoreSortField, UserSortField};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Rating API",
        version = "0.1.0",
        description = "Role-based store rating platform: admins manage users and stores, users rate stores, owners follow their ratings"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::change_password,
        auth_handler::me,
        admin_handler::create_user,
        admin_handler::list_users,
        admin_handler::get_user,
        admin_handler::create_store,
        admin_handler::list_stores,
        admin_handler::dashboard,
        store_handler::list_stores,
        store_handler::owned_stores,
        store_handler::store_ratings,
        rating_handler::submit_rating,
        rating_handler::update_rating,
        rating_handler::list_ratings,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            UserSummary,
            RatingSummary,
            UserDetail,
            StoreView,
            StoreRatings,
            StoreRatingEntry,
            StoreSummary,
            RatingView,
            DashboardStats,
            LoginResponse,
            MessageResponse,
            SortOrder,
            UserSortField,
            StoreSortField,
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::ChangePasswordRequest,
            admin_handler::CreateUserRequest,
            admin_handler::CreateStoreRequest,
            rating_handler::SubmitRatingRequest,
            rating_handler::UpdateRatingRequest,
            rating_handler::RatingResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and session management"),
        (name = "Admin", description = "User, store and dashboard administration"),
        (name = "Stores", description = "Store listings and owner views"),
        (name = "Ratings", description = "Submitting and modifying ratings")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from /auth/login; the accessToken cookie also works"))
                        .build(),
                ),
            );
        }
    }
}
