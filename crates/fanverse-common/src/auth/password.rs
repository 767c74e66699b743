//! Password hashing (Argon2id) and strength rules

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use fanverse_core::DomainError;

use crate::error::AppError;

pub const PASSWORD_MIN_LEN: usize = 8;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// `Ok(false)` on mismatch; `Err` only if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// At least eight characters with an uppercase letter, a lowercase letter
/// and a digit. All unmet rules are reported together.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        missing.push("at least 8 characters");
    }
    if !password.chars().any(char::is_uppercase) {
        missing.push("an uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        missing.push("a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::WeakPassword(format!("password needs {}", missing.join(", "))).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Fanverse123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Fanverse123", &hash).unwrap());
        assert!(!verify_password("fanverse123", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(
            hash_password("Fanverse123").unwrap(),
            hash_password("Fanverse123").unwrap()
        );
    }

    #[test]
    fn test_malformed_hash() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("Abcdefg1").is_ok());

        let err = validate_password_strength("short").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("8 characters"));
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
        assert_eq!(err.error_code(), "WEAK_PASSWORD");
        assert_eq!(err.status_code(), 400);
    }
}
