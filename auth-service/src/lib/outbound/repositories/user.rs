use std::collections::HashMap;

use std::collections::hash_map::Entry;

use async_trait::async_trait;
use bearer_auth::PasswordError;
use bearer_auth::PasswordHasher;
use bearer_auth::UserRecord;
use bearer_auth::UserStore;
use bearer_auth::UserStoreError;
use tokio::sync::RwLock;

use crate::config::SeedUserConfig;
use crate::domain::account::errors::AccountError;
use crate::domain::account::ports::AccountRepository;

/// User store held in process memory, keyed by lowercased email.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from configured accounts, hashing each password.
    ///
    /// # Arguments
    /// * `seeds` - Accounts with plaintext passwords
    /// * `hasher` - Hasher producing the stored password hashes
    ///
    /// # Errors
    /// * `HashingFailed` - A password could not be hashed
    pub async fn seeded<H: PasswordHasher>(
        seeds: &[SeedUserConfig],
        hasher: &H,
    ) -> Result<Self, PasswordError> {
        let store = Self::new();

        for seed in seeds {
            let password_hash = hasher.hash(&seed.password)?;
            store
                .insert(UserRecord {
                    email: seed.email.clone(),
                    password_hash: Some(password_hash),
                    roles: seed.roles.clone(),
                })
                .await;
        }

        tracing::info!(users = seeds.len(), "User store seeded");
        Ok(store)
    }

    /// Add or replace an account.
    pub async fn insert(&self, user: UserRecord) {
        let key = user.email.to_lowercase();
        self.users.write().await.insert(key, user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(&email.to_lowercase()).cloned())
    }
}

#[async_trait]
impl AccountRepository for InMemoryUserStore {
    async fn create(&self, user: UserRecord) -> Result<UserRecord, AccountError> {
        match self.users.write().await.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AccountError::EmailAlreadyExists(user.email)),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }
}
