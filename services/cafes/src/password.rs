//! Password hashing and verification
//!
//! Argon2id with a random per-password salt, stored as a PHC string
//! (`$argon2id$v=19$m=...`).

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plaintext password
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored PHC string
///
/// A mismatch is `Ok(false)`; a malformed stored hash is an error.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let hash = hash_password("pw123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "pw123").unwrap());
        assert!(!verify_password(&hash, "pw124").unwrap());
        assert!(!verify_password(&hash, "").unwrap());
        assert!(!verify_password(&hash, "PW123").unwrap());
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let first = hash_password("pw123").unwrap();
        let second = hash_password("pw123").unwrap();
        assert_ne!(first, second);
        assert!(verify_password(&second, "pw123").unwrap());
    }

    #[test]
    fn test_never_stores_plaintext() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!hash.contains("correct horse"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("pbkdf2:sha256:nonsense", "pw123").is_err());
    }
}
