use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Principal;
use crate::domain::session::models::SessionTokens;

/// Port for session operations exposed to the HTTP layer.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and mint an access/refresh pair.
    ///
    /// # Arguments
    /// * `command` - Validated email and submitted password
    ///
    /// # Returns
    /// Access token, refresh token and access lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Login rejected, for any reason
    /// * `UserStore` - User lookup failed
    /// * `TokenIssue` - Token encoding failed
    async fn login(&self, command: LoginCommand) -> Result<SessionTokens, SessionError>;

    /// Exchange a refresh token for a new pair, revoking the old one.
    ///
    /// The presented token is spent before the account lookup, so it is
    /// single-use even under concurrent calls and stays spent if the
    /// lookup then fails.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token presented by the client
    ///
    /// # Returns
    /// Freshly minted tokens with roles reloaded from the user store
    ///
    /// # Errors
    /// * `InvalidToken` - Not a valid refresh token, already spent, or its account is gone
    /// * `UserStore` - User lookup failed
    /// * `TokenIssue` - Token encoding failed
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, SessionError>;

    /// Revoke a token so it no longer validates.
    async fn logout(&self, token: &str) -> Result<(), SessionError>;

    /// Resolve a bearer access token to its principal.
    ///
    /// # Errors
    /// * `InvalidToken` - Token fails validation or is not an access token
    fn authorize(&self, access_token: &str) -> Result<Principal, SessionError>;
}
