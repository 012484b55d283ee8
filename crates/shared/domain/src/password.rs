//! Password value object and password policy.
//!
//! Hashing uses Argon2 with the default parameters. The policy requires
//! 8 to 16 characters, at least one uppercase letter and at least one
//! special character out of `!@#$&*`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::error::{DomainError, DomainResult};

/// User-facing message for every policy violation
pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must be 8-16 characters with at least one uppercase letter and one special character";

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!@#$&*]").expect("valid regex"));

/// Check a plain text password against the password policy.
pub fn validate_password_policy(plain_text: &str) -> DomainResult<()> {
    let length = plain_text.chars().count();
    let length_ok = (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length);

    if length_ok && UPPERCASE.is_match(plain_text) && SPECIAL.is_match(plain_text) {
        Ok(())
    } else {
        Err(DomainError::password(PASSWORD_POLICY_MESSAGE))
    }
}

/// Hashed password value object.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Never print the hash
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate the policy and hash the plain text.
    ///
    /// # Errors
    /// Returns a password error if the policy is not met or hashing fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        validate_password_policy(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap an existing hash (read from the database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
