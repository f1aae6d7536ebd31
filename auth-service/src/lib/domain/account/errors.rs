use bearer_auth::PasswordError;
use thiserror::Error;

use crate::domain::session::errors::EmailError;

/// Error for role name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role name cannot be empty")]
    Empty,

    #[error("Invalid role name: {0}")]
    InvalidCharacters(String),
}

/// Top-level error for account operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Account already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        AccountError::PasswordHashing(err.to_string())
    }
}
