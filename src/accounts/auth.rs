//! Credential hashing and verification.
//!
//! # Design Decisions
//! - Argon2id via the password-hash string format; the stored digest is
//!   opaque to everything outside this module
//! - One generic failure for all login problems: callers cannot tell an
//!   unknown username from a wrong password

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use super::{Account, AccountStore};

/// Errors from the account authenticator.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password hashing failed; registration cannot proceed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Username/password pair did not verify.
    #[error("login failed")]
    InvalidCredentials,
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored digest.
///
/// Malformed digests verify as false rather than erroring, so they surface
/// to the caller exactly like a wrong password.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Create an account.
///
/// No existence check: a duplicate username appends a second row.
pub fn register(store: &AccountStore, username: &str, password: &str) -> Result<(), AuthError> {
    let password_hash = hash_password(password)?;
    store.insert(Account {
        username: username.to_string(),
        password_hash,
    });
    Ok(())
}

/// Verify credentials against the first stored row for the username.
pub fn login(store: &AccountStore, username: &str, password: &str) -> Result<(), AuthError> {
    let verified = store
        .find_first(username)
        .map(|account| verify_password(password, &account.password_hash))
        .unwrap_or(false);

    if verified {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
