use async_trait::async_trait;
use bearer_auth::UserRecord;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateAccountCommand;

/// Port for account operations exposed to the HTTP layer.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create a new account with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password and roles
    ///
    /// # Returns
    /// Created account, without its password hash
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `EmailAlreadyExists` - An account with that email exists
    /// * `PasswordHashing` - Password could not be hashed
    /// * `Repository` - Storage failed
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;
}

/// Port for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Store a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email taken, compared case-insensitively
    async fn create(&self, user: UserRecord) -> Result<UserRecord, AccountError>;
}
