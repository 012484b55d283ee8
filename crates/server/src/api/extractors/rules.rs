//! `validator` custom functions backed by the domain field rules.

use std::borrow::Cow;

use validator::ValidationError;

use domain::DomainError;

fn to_validation_error(code: &'static str, err: DomainError) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(err.to_string()));
    error
}

pub fn user_name(value: &str) -> Result<(), ValidationError> {
    domain::validation::validate_user_name(value).map_err(|e| to_validation_error("name", e))
}

pub fn user_address(value: &str) -> Result<(), ValidationError> {
    domain::validation::validate_user_address(value).map_err(|e| to_validation_error("address", e))
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    domain::validate_password_policy(value).map_err(|e| to_validation_error("password", e))
}

pub fn store_name(value: &str) -> Result<(), ValidationError> {
    domain::validation::validate_store_name(value).map_err(|e| to_validation_error("name", e))
}

pub fn store_address(value: &str) -> Result<(), ValidationError> {
    domain::validation::validate_store_address(value)
        .map_err(|e| to_validation_error("address", e))
}
