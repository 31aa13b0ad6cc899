// Password hashing and verification service

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a password against a stored hash
    ///
    /// A mismatch is `Ok(false)`; only an unparseable hash is an error.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = PasswordService::hash_password("pw123").unwrap();
        assert!(PasswordService::verify_password("pw123", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = PasswordService::hash_password("pw123").unwrap();
        assert!(!PasswordService::verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per hash
        let a = PasswordService::hash_password("pw123").unwrap();
        let b = PasswordService::hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(PasswordService::verify_password("pw123", "not-a-phc-string").is_err());
    }
}
