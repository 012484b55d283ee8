//! User service - account creation and administration.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Password, User, UserResponse, UserRole};

use super::store_service::{build_store_views, StoreView};
use crate::infra::UnitOfWork;
use crate::types::{matches_filter, UserListQuery, UserSortField};

/// Data needed to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub role: UserRole,
}

/// User detail returned to admins; store owners also list their stores
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stores: Option<Vec<StoreView>>,
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create an account after the uniqueness and password checks.
///
/// Shared by public signup and admin creation.
pub(crate) async fn register_user<U: UnitOfWork + ?Sized>(uow: &U, new_user: NewUser) -> AppResult<User> {
    let email = normalize_email(&new_user.email);

    if uow.users().find_by_email(&email).await?.is_some() {
        tracing::warn!(email = %email, "Registration rejected: email already in use");
        return Err(AppError::conflict("User with this email"));
    }

    let password_hash = Password::new(&new_user.password)?.into_string();
    let user = User::new(
        new_user.name.trim().to_string(),
        email,
        password_hash,
        new_user.address.trim().to_string(),
        new_user.role,
    );

    let user = uow.users().create(user).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User created");
    Ok(user)
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user with any role (admin operation)
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by ID with owned stores for store owners
    async fn get_user_detail(&self, id: Uuid) -> AppResult<UserDetail>;

    /// List users matching the filters, sorted as requested
    async fn list_users(&self, query: UserListQuery) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        register_user(self.uow.as_ref(), new_user).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn get_user_detail(&self, id: Uuid) -> AppResult<UserDetail> {
        let user = self.get_user(id).await?;

        let stores = if user.is_store_owner() {
            let owned = self.uow.stores().list_by_owner(user.id).await?;
            let summaries = self.uow.ratings().summaries().await?;
            let owners = HashMap::from([(user.id, user.clone())]);
            Some(build_store_views(owned, &owners, &summaries, &HashMap::new()))
        } else {
            None
        };

        Ok(UserDetail {
            user: UserResponse::from(user),
            stores,
        })
    }

    async fn list_users(&self, query: UserListQuery) -> AppResult<Vec<User>> {
        let role = match query.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(role) => Some(role.parse::<UserRole>()?),
        };

        let mut users: Vec<User> = self
            .uow
            .users()
            .list()
            .await?
            .into_iter()
            .filter(|u| matches_filter(&u.name, query.name.as_deref()))
            .filter(|u| matches_filter(&u.email, query.email.as_deref()))
            .filter(|u| matches_filter(&u.address, query.address.as_deref()))
            .filter(|u| role.map_or(true, |r| u.role == r))
            .collect();

        let order = query.order.unwrap_or_default();
        let field = query.sort_by.unwrap_or_default();
        users.sort_by(|a, b| {
            let ordering = match field {
                UserSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                UserSortField::Email => a.email.cmp(&b.email),
                UserSortField::Address => a.address.to_lowercase().cmp(&b.address.to_lowercase()),
                UserSortField::Role => a.role.as_str().cmp(b.role.as_str()),
                UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            order.apply(ordering)
        });

        Ok(users)
    }
}
