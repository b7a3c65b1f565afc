use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use super::AuthError;

/// Argon2id hash with the default cost parameters that matches no password.
/// Verifying against it costs the same as checking a real user's password.
pub const UNMATCHABLE_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$b3JnYXV0aGR1bW15c2FsdA$b3JnYXV0aC1sb2dpbi10aW1pbmctZXF1YWxpc2VyISE";

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string (algorithm, params, salt and hash) for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
