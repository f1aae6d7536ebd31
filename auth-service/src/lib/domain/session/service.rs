use std::sync::Arc;

use async_trait::async_trait;
use bearer_auth::Authenticator;
use bearer_auth::PasswordHasher;
use bearer_auth::TokenKind;
use bearer_auth::TokenService;
use bearer_auth::UserStore;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Principal;
use crate::domain::session::models::SessionTokens;
use crate::domain::session::ports::SessionServicePort;

/// Role granted to accounts that have none stored.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// Domain service implementation for session operations.
///
/// Concrete implementation of SessionServicePort with dependency injection.
pub struct SessionService<US, PH>
where
    US: UserStore,
    PH: PasswordHasher,
{
    authenticator: Authenticator<US, PH>,
    users: Arc<US>,
    tokens: Arc<TokenService>,
}

impl<US, PH> SessionService<US, PH>
where
    US: UserStore,
    PH: PasswordHasher,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User store, shared with the authenticator
    /// * `hasher` - Password hasher used to check logins
    /// * `tokens` - Token service minting and validating tokens
    pub fn new(users: Arc<US>, hasher: Arc<PH>, tokens: Arc<TokenService>) -> Self {
        Self {
            authenticator: Authenticator::new(Arc::clone(&users), hasher),
            users,
            tokens,
        }
    }

    fn issue(&self, subject: &str, roles: Vec<String>) -> Result<SessionTokens, SessionError> {
        let roles = if roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            roles
        };

        let pair = self.tokens.issue_pair(subject, &roles)?;
        let expires_in = self.tokens.settings().access_token_ttl.num_seconds();

        Ok(SessionTokens::new(pair, expires_in))
    }
}

#[async_trait]
impl<US, PH> SessionServicePort for SessionService<US, PH>
where
    US: UserStore,
    PH: PasswordHasher,
{
    async fn login(&self, command: LoginCommand) -> Result<SessionTokens, SessionError> {
        let identity = self
            .authenticator
            .authenticate(command.email.as_str(), &command.password)
            .await?;

        let tokens = self.issue(&identity.email, identity.roles)?;
        tracing::info!(email = %identity.email, "Tokens issued");

        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, SessionError> {
        if !self.tokens.validate_kind(refresh_token, TokenKind::Refresh) {
            return Err(SessionError::InvalidToken);
        }

        // Spent before the store lookup: of concurrent callers, one wins
        if !self.tokens.try_revoke(refresh_token) {
            tracing::warn!("Refresh token replayed");
            return Err(SessionError::InvalidToken);
        }

        let subject = self.tokens.extract_subject(refresh_token)?;
        let user = self
            .users
            .find_by_email(&subject)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %subject, "Refresh for unknown account");
                SessionError::InvalidToken
            })?;

        let tokens = self.issue(&user.email, user.roles)?;
        tracing::info!(email = %user.email, "Tokens refreshed");

        Ok(tokens)
    }

    async fn logout(&self, token: &str) -> Result<(), SessionError> {
        self.tokens.revoke(token);
        Ok(())
    }

    fn authorize(&self, access_token: &str) -> Result<Principal, SessionError> {
        if !self.tokens.validate_kind(access_token, TokenKind::Access) {
            return Err(SessionError::InvalidToken);
        }

        Ok(Principal {
            subject: self.tokens.extract_subject(access_token)?,
            roles: self.tokens.extract_roles(access_token)?,
        })
    }
}
