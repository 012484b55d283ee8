//! JWT authentication middleware and role guards.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{UserRole, ACCESS_TOKEN_COOKIE, BEARER_TOKEN_PREFIX};

use crate::api::AppState;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Token from `Authorization: Bearer ...`, falling back to the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware.
///
/// Validates the token and injects the [`CurrentUser`] into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(&token)?;

    let role = claims.role.parse::<UserRole>().map_err(|_| {
        tracing::warn!(user_id = %claims.sub, role = %claims.role, "Token carries unknown role");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
        role,
    });

    Ok(next.run(request).await)
}

/// Route guard for admin-only groups; must run after [`auth_middleware`].
pub async fn admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    require_admin(user)?;

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    require_role(user, &[UserRole::Admin])
}

pub fn require_store_owner(user: &CurrentUser) -> AppResult<()> {
    require_role(user, &[UserRole::StoreOwner])
}

/// Require one of the listed roles.
pub fn require_role(user: &CurrentUser, allowed: &[UserRole]) -> AppResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.id, role = %user.role, "Role check failed");
        Err(AppError::forbidden("Insufficient permissions"))
    }
}
