use std::fmt;
use std::sync::Arc;

use crate::password::PasswordHasher;
use crate::ports::UserStore;
use crate::ports::UserStoreError;

/// Login coordinator over a user store and a password hasher.
///
/// Produces a verified identity; minting tokens for it is the caller's job.
pub struct Authenticator<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    users: Arc<S>,
    hasher: Arc<H>,
}

/// Identity proven by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    /// Roles as stored for the account
    pub roles: Vec<String>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
}

/// Why a login attempt was turned down. Logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    UserNotFound,
    NoStoredPassword,
    WrongPassword,
    UnreadableHash,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::UserNotFound => "user not found",
            Rejection::NoStoredPassword => "no stored password",
            Rejection::WrongPassword => "wrong password",
            Rejection::UnreadableHash => "unreadable stored hash",
        };
        f.write_str(reason)
    }
}

enum Outcome {
    Accepted(VerifiedIdentity),
    Rejected(Rejection),
}

impl<S, H> Authenticator<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    pub fn new(users: Arc<S>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Verify an email and password pair.
    ///
    /// # Arguments
    /// * `email` - Login email as submitted
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// The account's email and stored roles
    ///
    /// # Errors
    /// * `InvalidCredentials` - Any rejection, whatever the reason
    /// * `UserStore` - The user store lookup itself failed
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<VerifiedIdentity, AuthenticationError> {
        match self.attempt(email, password).await? {
            Outcome::Accepted(identity) => {
                tracing::info!(email = %identity.email, "Login accepted");
                Ok(identity)
            }
            Outcome::Rejected(reason) => {
                tracing::warn!(email = %email, reason = %reason, "Login rejected");
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }

    async fn attempt(&self, email: &str, password: &str) -> Result<Outcome, UserStoreError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.spend_hash(password);
            return Ok(Outcome::Rejected(Rejection::UserNotFound));
        };

        let stored_hash = match user.password_hash.as_deref().map(str::trim) {
            Some(hash) if !hash.is_empty() => hash,
            _ => {
                self.spend_hash(password);
                return Ok(Outcome::Rejected(Rejection::NoStoredPassword));
            }
        };

        let outcome = match self.hasher.verify(password, stored_hash) {
            Ok(true) => Outcome::Accepted(VerifiedIdentity {
                email: user.email,
                roles: user.roles,
            }),
            Ok(false) => Outcome::Rejected(Rejection::WrongPassword),
            Err(e) => {
                tracing::error!(email = %email, error = %e, "Stored password hash unusable");
                Outcome::Rejected(Rejection::UnreadableHash)
            }
        };

        Ok(outcome)
    }

    // Paths that never reach `verify` still pay for one hash.
    fn spend_hash(&self, password: &str) {
        if let Err(e) = self.hasher.hash(password) {
            tracing::debug!(error = %e, "Decoy hash failed");
        }
    }
}

impl<S, H> Clone for Authenticator<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}
