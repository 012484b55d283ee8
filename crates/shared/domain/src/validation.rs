//! Field rules shared by signup, admin user creation and store creation.
//!
//! Lengths are counted in characters on the trimmed value.

use crate::constants::{MAX_ADDRESS_LENGTH, MAX_NAME_LENGTH, MIN_ADDRESS_LENGTH, MIN_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 20 and 60 characters";
pub const ADDRESS_LENGTH_MESSAGE: &str = "Address must be between 10 and 400 characters";
pub const STORE_NAME_REQUIRED_MESSAGE: &str = "Store name is required";
pub const STORE_ADDRESS_LENGTH_MESSAGE: &str = "Address must be at most 400 characters";

fn trimmed_len(value: &str) -> u64 {
    value.trim().chars().count() as u64
}

pub fn validate_user_name(name: &str) -> DomainResult<()> {
    let len = trimmed_len(name);
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(DomainError::validation(NAME_LENGTH_MESSAGE))
    }
}

pub fn validate_user_address(address: &str) -> DomainResult<()> {
    let len = trimmed_len(address);
    if (MIN_ADDRESS_LENGTH..=MAX_ADDRESS_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(DomainError::validation(ADDRESS_LENGTH_MESSAGE))
    }
}

pub fn validate_store_name(name: &str) -> DomainResult<()> {
    if trimmed_len(name) == 0 {
        return Err(DomainError::validation(STORE_NAME_REQUIRED_MESSAGE));
    }
    Ok(())
}

pub fn validate_store_address(address: &str) -> DomainResult<()> {
    if address.chars().count() as u64 > MAX_ADDRESS_LENGTH {
        return Err(DomainError::validation(STORE_ADDRESS_LENGTH_MESSAGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_bounds_use_trimmed_length() {
        assert!(validate_user_name(&"a".repeat(19)).is_err());
        assert!(validate_user_name(&"a".repeat(20)).is_ok());
        assert!(validate_user_name(&"a".repeat(60)).is_ok());
        assert!(validate_user_name(&"a".repeat(61)).is_err());

        let padded = format!("   {}   ", "a".repeat(19));
        assert!(validate_user_name(&padded).is_err());
    }

    #[test]
    fn test_user_address_bounds() {
        assert!(validate_user_address("short").is_err());
        assert!(validate_user_address("10 Long St").is_ok());
        assert!(validate_user_address(&"x".repeat(401)).is_err());
    }

    #[test]
    fn test_store_name_required() {
        assert!(validate_store_name("   ").is_err());
        assert!(validate_store_name("A").is_ok());
    }

    #[test]
    fn test_store_address_max() {
        assert!(validate_store_address("").is_ok());
        assert!(validate_store_address(&"x".repeat(400)).is_ok());
        let err = validate_store_address(&"x".repeat(401)).unwrap_err();
        assert_eq!(err.to_string(), STORE_ADDRESS_LENGTH_MESSAGE);
    }
}
