//! # Password Hashing
//!
//! Salesperson passwords are stored as salted argon2 hashes in PHC string
//! form (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) and never compared as
//! plaintext.
//!
//! ```text
//! register:  plaintext ──► hash_password ──► salesperson.password_hash
//! login:     plaintext ──► verify_password(plaintext, stored hash) ──► bool
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;

/// Hashing failed (parameter or salt errors from argon2).
#[derive(Debug, Error)]
#[error("Failed to hash password: {0}")]
pub struct PasswordError(String);

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored hash.
///
/// A stored value that is not a valid PHC string never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Sunshine42").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("Sunshine42"));
        assert!(verify_password("Sunshine42", &hash));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let hash = hash_password("Sunshine42").unwrap();

        assert!(!verify_password("sunshine42", &hash));
        assert!(!verify_password("SUNSHINE42", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_plaintext_stored_value_never_verifies() {
        assert!(!verify_password("hunter2", "hunter2"));
        assert!(!verify_password("", ""));
    }
}
