//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_STORE_OWNER, ROLE_USER};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    #[default]
    User,
    Admin,
    StoreOwner,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role owns stores
    pub fn is_store_owner(&self) -> bool {
        matches!(self, UserRole::StoreOwner)
    }

    /// Check if this role may submit ratings
    pub fn can_rate(&self) -> bool {
        matches!(self, UserRole::User | UserRole::StoreOwner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Admin => ROLE_ADMIN,
            UserRole::StoreOwner => ROLE_STORE_OWNER,
        }
    }
}

/// Lenient conversion used for stored rows; unknown values fall back to `User`.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

/// Strict conversion used for client input.
impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(UserRole::User),
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_STORE_OWNER => Ok(UserRole::StoreOwner),
            _ => Err(DomainError::validation("Invalid role")),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub address: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated id
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        address: String,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            address,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_store_owner(&self) -> bool {
        self.role.is_store_owner()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Postal address
    pub address: String,
    /// User role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse::from(user.clone())
    }
}

/// Compact user reference embedded in store and rating responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User::new(
            "Sample Person With Long Name".to_string(),
            "sample@example.com".to_string(),
            "hash".to_string(),
            "42 Sample Street, Sample City".to_string(),
            role,
        )
    }

    #[test]
    fn test_role_capabilities() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Admin.can_rate());
        assert!(UserRole::User.can_rate());
        assert!(UserRole::StoreOwner.can_rate());
        assert!(UserRole::StoreOwner.is_store_owner());
        assert!(!UserRole::User.is_store_owner());
    }

    #[test]
    fn test_role_strict_parse() {
        assert_eq!("STORE_OWNER".parse::<UserRole>().unwrap(), UserRole::StoreOwner);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("admin".parse::<UserRole>().is_err());
        assert!("SUPERUSER".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_lenient_from_str() {
        assert_eq!(UserRole::from("STORE_OWNER"), UserRole::StoreOwner);
        assert_eq!(UserRole::from("garbage"), UserRole::User);
    }

    #[test]
    fn test_role_serde_uses_uppercase() {
        let json = serde_json::to_string(&UserRole::StoreOwner).unwrap();
        assert_eq!(json, "\"STORE_OWNER\"");

        let parsed: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in [UserRole::User, UserRole::Admin, UserRole::StoreOwner] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_user_response_hides_password() {
        let user = sample_user(UserRole::User);
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "USER");
        assert!(json.get("createdAt").is_some());
    }
}
