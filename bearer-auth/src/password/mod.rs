pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2PasswordHasher;
pub use errors::PasswordError;

/// Password hashing port used by the authenticator.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True if the password matches
    ///
    /// # Errors
    /// * `UnreadableHash` - Stored hash is not a PHC string
    /// * `UnsupportedAlgorithm` - Stored hash was made by another algorithm
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}
