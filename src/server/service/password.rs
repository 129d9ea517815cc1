//! Argon2 password hashing.
//!
//! Hashing and verification are CPU bound, so both run on the blocking thread pool
//! instead of an async worker.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password into a PHC string with a random salt.
///
/// # Returns
/// - `Ok(String)` - PHC formatted argon2id hash
/// - `Err(AppError::InternalErr)` - Hashing failed or the blocking task panicked
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    let hash = tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))??;

    Ok(hash)
}

/// Checks a password against a stored hash.
///
/// A stored value that is not a valid PHC string never verifies; it is logged because it
/// points at corrupted data.
///
/// # Returns
/// - `Ok(bool)` - Whether the password matches
/// - `Err(AppError::InternalErr)` - The blocking task panicked
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();

    let matches = tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))?;

    Ok(matches)
}

fn hash_blocking(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
