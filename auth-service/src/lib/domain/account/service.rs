use std::sync::Arc;

use async_trait::async_trait;
use bearer_auth::PasswordHasher;
use bearer_auth::UserRecord;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
pub struct AccountService<AR, PH>
where
    AR: AccountRepository,
    PH: PasswordHasher,
{
    repository: Arc<AR>,
    hasher: Arc<PH>,
}

impl<AR, PH> AccountService<AR, PH>
where
    AR: AccountRepository,
    PH: PasswordHasher,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `hasher` - Hasher producing stored password hashes
    pub fn new(repository: Arc<AR>, hasher: Arc<PH>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<AR, PH> AccountServicePort for AccountService<AR, PH>
where
    AR: AccountRepository,
    PH: PasswordHasher,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let password_hash = self.hasher.hash(&command.password)?;

        let mut roles: Vec<String> = Vec::with_capacity(command.roles.len());
        for role in command.roles {
            if !roles.iter().any(|r| r == role.as_str()) {
                roles.push(role.as_str().to_string());
            }
        }

        let created = self
            .repository
            .create(UserRecord {
                email: command.email.as_str().to_string(),
                password_hash: Some(password_hash),
                roles,
            })
            .await?;

        tracing::info!(email = %created.email, roles = ?created.roles, "Account created");

        Ok(Account {
            email: created.email,
            roles: created.roles,
        })
    }
}
