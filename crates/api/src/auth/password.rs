//! Account password storage.
//!
//! Stored values are Argon2id PHC strings: the salt and cost parameters travel
//! with the hash, so changing the defaults never invalidates existing users.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("could not hash password: {0}")]
    Hash(password_hash::Error),

    /// The stored value is not a PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(password_hash::Error),

    #[error("could not verify password: {0}")]
    Verify(password_hash::Error),
}

/// Hash `plain` for storage in `users.password_hash`.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(PasswordError::Hash)
}

/// Check `plain` against a stored hash. A mismatch is `Ok(false)`.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let phc = PasswordHash::new(stored).map_err(PasswordError::MalformedHash)?;
    match Argon2::default().verify_password(plain.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(other) => Err(PasswordError::Verify(other)),
    }
}
