use ::argon2::password_hash;
use ::argon2::password_hash::rand_core::OsRng;
use ::argon2::password_hash::PasswordHash;
use ::argon2::password_hash::PasswordHasher as _;
use ::argon2::password_hash::PasswordVerifier;
use ::argon2::password_hash::SaltString;
use ::argon2::Argon2;

use super::errors::PasswordError;
use super::PasswordHasher;

/// Argon2id password hasher producing PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    /// Hash a plaintext password with a random salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::UnreadableHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(password_hash::Error::Algorithm) => Err(PasswordError::UnsupportedAlgorithm(
                parsed_hash.algorithm.to_string(),
            )),
            Err(e) => Err(PasswordError::UnreadableHash(e.to_string())),
        }
    }
}
