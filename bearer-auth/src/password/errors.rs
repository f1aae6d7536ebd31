use thiserror::Error;

/// Error type for password hashing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unreadable: {0}")]
    UnreadableHash(String),

    #[error("Stored password hash uses an unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
