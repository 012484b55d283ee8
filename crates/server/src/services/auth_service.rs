//! Authentication service - signup, login, tokens and password changes.
//!
//! Password hashing and the password policy live in `domain::Password`;
//! this service only orchestrates lookups and token issuance.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig, OptionExt};
use domain::{Password, User, UserResponse, UserRole, TOKEN_TYPE_BEARER};

use super::user_service::{register_user, NewUser};
use crate::infra::UnitOfWork;

/// Verified against when the email is unknown so both paths cost one argon2 run
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("Dummy@Pass1")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Public signup data; `role` may only be USER
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub role: Option<String>,
}

/// Login result with the token and the authenticated user
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a regular user account
    async fn signup(&self, signup: Signup) -> AppResult<User>;

    /// Verify credentials and issue a JWT
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Replace the password after checking the current one
    async fn change_password(
        &self,
        user_id: Uuid,
        old_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, jwt: &JwtConfig) -> AppResult<LoginResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(jwt.expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.secret_bytes()),
    )?;

    Ok(LoginResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: jwt.expiration_seconds(),
        user: UserResponse::from(user),
    })
}

/// Only USER may be chosen at signup; absent means USER.
fn signup_role(requested: Option<&str>) -> AppResult<UserRole> {
    match requested.map(str::trim) {
        None | Some("") => Ok(UserRole::User),
        Some(role) if role == UserRole::User.as_str() => Ok(UserRole::User),
        Some(_) => Err(AppError::bad_request(
            "Invalid role: you can only sign up as a user",
        )),
    }
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    jwt: JwtConfig,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, jwt: JwtConfig) -> Self {
        Self { uow, jwt }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, signup: Signup) -> AppResult<User> {
        let role = signup_role(signup.role.as_deref())?;

        register_user(
            self.uow.as_ref(),
            NewUser {
                name: signup.name,
                email: signup.email,
                password: signup.password,
                address: signup.address,
                role,
            },
        )
        .await
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let email = super::user_service::normalize_email(&email);
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify even for unknown emails so timing does not reveal accounts
        let stored = match &user {
            Some(u) => Password::from_hash(u.password_hash.as_str()),
            None => Password::from_hash(DUMMY_HASH.as_str()),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                generate_token(&user, &self.jwt)
            }
            _ => {
                tracing::warn!(email = %email, "Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        old_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        if !Password::from_hash(user.password_hash.as_str()).verify(&old_password) {
            tracing::warn!(user_id = %user.id, "Password change rejected: wrong current password");
            return Err(AppError::InvalidCredentials);
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow.users().update_password(user.id, password_hash).await?;
        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::test_support::{sample_user, TestUnitOfWork};
    use mockall::predicate::{always, eq, function};

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-that-is-at-least-32-chars".to_string(),
            expiration_hours: 1,
        }
    }

    fn authenticator(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork::new().with_users(users)), jwt())
    }

    fn user_with_password(email: &str, plain: &str) -> User {
        let mut user = sample_user(email, UserRole::User);
        user.password_hash = Password::new(plain).unwrap().into_string();
        user
    }

    fn signup(role: Option<&str>) -> Signup {
        Signup {
            name: "A Perfectly Normal Customer".into(),
            email: "new@example.com".into(),
            password: "Secure@Pass1".into(),
            address: "5 Quiet Lane, Hometown".into(),
            role: role.map(String::from),
        }
    }

    // =========================================================================
    // Signup
    // =========================================================================

    #[tokio::test]
    async fn test_signup_defaults_to_user_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(u));

        let user = authenticator(users).signup(signup(None)).await.unwrap();

        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.email, "new@example.com");
    }

    #[tokio::test]
    async fn test_signup_accepts_explicit_user_role() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(u));

        let user = authenticator(users).signup(signup(Some("USER"))).await.unwrap();

        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_signup_rejects_elevated_roles() {
        for role in ["ADMIN", "STORE_OWNER", "SUPERUSER"] {
            let mut users = MockUserRepository::new();
            users.expect_create().never();

            let err = authenticator(users)
                .signup(signup(Some(role)))
                .await
                .unwrap_err();

            assert!(matches!(err, AppError::BadRequest(_)));
            assert_eq!(err.to_string(), "Invalid role: you can only sign up as a user");
        }
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(email, UserRole::User))));

        let err = authenticator(users).signup(signup(None)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    // =========================================================================
    // Login and tokens
    // =========================================================================

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let user = user_with_password("login@example.com", "Login@Pass1");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(function(|email: &str| email == "login@example.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(users);
        let response = auth
            .login("Login@Example.com".into(), "Login@Pass1".into())
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.user.id, user_id);

        let claims = auth.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "USER");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = user_with_password("login@example.com", "Login@Pass1");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let err = authenticator(users)
            .login("login@example.com".into(), "Wrong@Pass1".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let err = authenticator(users)
            .login("ghost@example.com".into(), "Ghost@Pass1".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let auth = authenticator(MockUserRepository::new());
        tokio_test::assert_err!(auth.verify_token("not-a-jwt"));
    }

    #[test]
    fn test_verify_token_rejects_other_secret() {
        let user = sample_user("a@example.com", UserRole::Admin);
        let other = JwtConfig {
            secret: "a-completely-different-secret-of-32-chars".into(),
            expiration_hours: 1,
        };
        let token = generate_token(&user, &other).unwrap().access_token;

        let auth = authenticator(MockUserRepository::new());
        assert!(auth.verify_token(&token).is_err());
    }

    // =========================================================================
    // Password change
    // =========================================================================

    #[tokio::test]
    async fn test_change_password_success() {
        let user = user_with_password("me@example.com", "Old@Pass11");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_update_password()
            .with(eq(user_id), function(|hash: &String| Password::from_hash(hash.as_str()).verify("New@Pass11")))
            .returning(|id, _| {
                let mut u = sample_user("me@example.com", UserRole::User);
                u.id = id;
                Ok(u)
            });

        let result = authenticator(users)
            .change_password(user_id, "Old@Pass11".into(), "New@Pass11".into())
            .await;

        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let user = user_with_password("me@example.com", "Old@Pass11");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_update_password().never();

        let err = authenticator(users)
            .change_password(user_id, "Nope@Pass11".into(), "New@Pass11".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_change_password_enforces_policy() {
        let user = user_with_password("me@example.com", "Old@Pass11");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_update_password().with(always(), always()).never();

        let err = authenticator(users)
            .change_password(user_id, "Old@Pass11".into(), "weak".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}
