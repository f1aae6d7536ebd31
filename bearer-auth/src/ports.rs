use async_trait::async_trait;
use thiserror::Error;

/// Stored account data the authenticator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    /// PHC password hash; `None` for accounts that cannot log in with a password
    pub password_hash: Option<String>,
    /// Role names in the order the store returns them
    pub roles: Vec<String>,
}

/// Error for user store lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve a user with its roles by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be reached
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError>;
}
