//! API middleware.

mod auth;
mod rate_limit;

pub use auth::{
    admin_guard, auth_middleware, require_admin, require_role, require_store_owner, CurrentUser,
};
pub use rate_limit::{rate_limit_auth_middleware, RateLimitError};
