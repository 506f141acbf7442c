use argon2::{
    password_hash::{self, PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("argon2 could not hash password: {0}")]
    Hash(password_hash::Error),

    #[error("stored password is not a PHC string: {0}")]
    MalformedHash(password_hash::Error),
}

/// Hashes a plaintext password into an Argon2 PHC string for the `password` column.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

#[cfg(test)]
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
