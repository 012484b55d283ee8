//! Authentication handlers.

use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{UserResponse, ACCESS_TOKEN_COOKIE};

use crate::api::extractors::{rules, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::services::{LoginResponse, Signup};
use crate::types::{ApiResponse, Created};

/// Public signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Full name, 20 to 60 characters
    #[validate(custom(function = "rules::user_name"))]
    #[schema(example = "Jonathan Alexander Smithson")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// 8-16 characters, one uppercase letter, one of `!@#$&*`
    #[validate(custom(function = "rules::password"))]
    #[schema(example = "Secure@Pass1")]
    pub password: String,
    /// Postal address, 10 to 400 characters
    #[validate(custom(function = "rules::user_address"))]
    #[schema(example = "221B Baker Street, London")]
    pub address: String,
    /// Only USER is accepted
    #[schema(example = "USER")]
    pub role: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "Secure@Pass1")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    #[validate(custom(function = "rules::password"))]
    pub new_password: String,
}

/// Routes open to anonymous callers
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that need an authenticated session
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/change-password", put(change_password))
        .route("/me", get(me))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// Expired, empty session cookie; sent regardless of how the caller authenticated
fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or role other than USER"),
        (status = 409, description = "Email already registered"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .signup(Signup {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            address: payload.address,
            role: payload.role,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Login, receive a JWT and the session cookie
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, ApiResponse<LoginResponse>)> {
    let response = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(session_cookie(response.access_token.clone()));
    Ok((jar, ApiResponse::with_message(response, "Login successful")))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged out", body = crate::types::MessageResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<()>) {
    tracing::info!(user_id = %current_user.id, "User logged out");
    let jar = jar.add(removal_cookie());
    (jar, ApiResponse::message("Logged out successfully"))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = crate::types::MessageResponse),
        (status = 400, description = "New password violates the policy"),
        (status = 401, description = "Wrong current password or not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .auth_service
        .change_password(current_user.id, payload.old_password, payload.new_password)
        .await?;

    Ok(ApiResponse::message("Password updated successfully"))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
