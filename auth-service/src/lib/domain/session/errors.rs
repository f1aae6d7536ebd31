use bearer_auth::AuthenticationError;
use bearer_auth::TokenError;
use bearer_auth::UserStoreError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for session operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    // Infrastructure errors
    #[error("User store error: {0}")]
    UserStore(String),

    #[error("Token issuance failed: {0}")]
    TokenIssue(String),
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            AuthenticationError::UserStore(e) => SessionError::UserStore(e.to_string()),
        }
    }
}

impl From<UserStoreError> for SessionError {
    fn from(err: UserStoreError) -> Self {
        SessionError::UserStore(err.to_string())
    }
}

impl From<TokenError> for SessionError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Format(_) => SessionError::InvalidToken,
            TokenError::EncodingFailed(e) => SessionError::TokenIssue(e),
        }
    }
}
