//! Password hashing.
//!
//! New passwords are stored only as Argon2id PHC strings with a per-password
//! random salt and the library's default cost parameters. Stores populated
//! by earlier deployments hold bcrypt hashes; those are still verified.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Hashing could not produce a PHC string.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError(e.to_string()))
}

/// Prefixes of the bcrypt variants accepted for verification.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Check a password against a stored hash.
///
/// Argon2 PHC strings and bcrypt hashes are both understood. A stored value
/// in neither format never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    if BCRYPT_PREFIXES.iter().any(|p| stored_hash.starts_with(p)) {
        return match bcrypt::verify(password, stored_hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(error = %e, "stored bcrypt hash is malformed");
                false
            }
        };
    }

    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
