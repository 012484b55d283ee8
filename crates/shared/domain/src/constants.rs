//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to users who sign up themselves
pub const ROLE_USER: &str = "USER";

/// Administrator role, manages accounts and stores
pub const ROLE_ADMIN: &str = "ADMIN";

/// Store owner role, views ratings of owned stores
pub const ROLE_STORE_OWNER: &str = "STORE_OWNER";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_STORE_OWNER];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum user name length (after trimming)
pub const MIN_NAME_LENGTH: u64 = 20;

/// Maximum user name length (after trimming)
pub const MAX_NAME_LENGTH: u64 = 60;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length requirement
pub const MAX_PASSWORD_LENGTH: usize = 16;

/// Characters accepted as the mandatory special character of a password
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$&*";

/// Minimum user address length (after trimming)
pub const MIN_ADDRESS_LENGTH: u64 = 10;

/// Maximum address length for users and stores
pub const MAX_ADDRESS_LENGTH: u64 = 400;

/// Lowest accepted rating value
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating value
pub const MAX_RATING: i32 = 5;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Name of the session cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
