use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use super::claims::Claims;
use super::claims::TokenKind;
use super::clock::Clock;
use super::clock::SystemClock;
use super::codec::TokenCodec;
use super::codec::TokenParts;
use super::errors::ConfigError;
use super::errors::TokenError;
use crate::revocation::RevocationStore;

/// Issuer written into tokens when none is configured.
pub const DEFAULT_ISSUER: &str = "auth-service";

/// Issuance parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// Value of `iss` on issued tokens; the only issuer `validate` accepts
    pub issuer: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            access_token_ttl: Duration::hours(24),
            refresh_token_ttl: Duration::hours(24),
        }
    }
}

/// Access and refresh token minted for one login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Validation step that rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Format,
    Claims,
    Revoked,
    Issuer,
    Signature,
    Expired,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Format => "malformed token",
            Rejection::Claims => "unreadable claims",
            Rejection::Revoked => "revoked token",
            Rejection::Issuer => "issuer mismatch",
            Rejection::Signature => "invalid signature",
            Rejection::Expired => "expired token",
        };
        f.write_str(reason)
    }
}

/// Token issuance and validation.
///
/// Stateless apart from the shared revocation store, so a single instance can
/// serve concurrent requests behind an `Arc`.
pub struct TokenService<C: Clock = SystemClock> {
    codec: TokenCodec,
    settings: TokenSettings,
    revocations: Arc<RevocationStore>,
    clock: C,
}

impl TokenService<SystemClock> {
    /// Create a token service on wall-clock time.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret, at least 32 bytes
    /// * `settings` - Issuer and token lifetimes
    /// * `revocations` - Revocation store shared with the sweeper
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    pub fn new(
        secret: &[u8],
        settings: TokenSettings,
        revocations: Arc<RevocationStore>,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(secret, settings, revocations, SystemClock)
    }
}

impl<C: Clock> TokenService<C> {
    /// Create a token service reading time from `clock`.
    pub fn with_clock(
        secret: &[u8],
        settings: TokenSettings,
        revocations: Arc<RevocationStore>,
        clock: C,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            codec: TokenCodec::new(secret)?,
            settings,
            revocations,
            clock,
        })
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue an access token carrying the given roles.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue_access(&self, subject: &str, roles: &[String]) -> Result<String, TokenError> {
        let claims = Claims::access(
            subject,
            roles.to_vec(),
            &self.settings.issuer,
            self.clock.now(),
            self.settings.access_token_ttl,
        );
        self.codec.encode(&claims)
    }

    /// Issue a refresh token (no roles, `type` = `REFRESH`).
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::refresh(
            subject,
            &self.settings.issuer,
            self.clock.now(),
            self.settings.refresh_token_ttl,
        );
        self.codec.encode(&claims)
    }

    /// Issue both tokens for a freshly authenticated principal.
    pub fn issue_pair(&self, subject: &str, roles: &[String]) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject, roles)?,
            refresh_token: self.issue_refresh(subject)?,
        })
    }

    /// Check a token for use.
    ///
    /// Never fails: every problem, including unparseable input, is `false`.
    /// Access and refresh tokens are both accepted; use
    /// [`TokenService::validate_kind`] to require one shape.
    pub fn validate(&self, token: &str) -> bool {
        match self.check(token) {
            Ok(_) => true,
            Err(rejection) => {
                match rejection {
                    Rejection::Issuer | Rejection::Signature => {
                        tracing::warn!(reason = %rejection, "Token rejected")
                    }
                    _ => tracing::debug!(reason = %rejection, "Token rejected"),
                }
                false
            }
        }
    }

    /// Check a token for use and require it to be of `kind`.
    pub fn validate_kind(&self, token: &str, kind: TokenKind) -> bool {
        match self.check(token) {
            Ok(claims) if claims.kind() == kind => true,
            Ok(claims) => {
                tracing::debug!(
                    expected = ?kind,
                    actual = ?claims.kind(),
                    "Token rejected: wrong token kind"
                );
                false
            }
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "Token rejected");
                false
            }
        }
    }

    // Format, revocation, issuer, signature, expiry. The payload is parsed
    // once up front because the revocation key lives inside it; a payload
    // that does not parse is rejected either way.
    fn check(&self, token: &str) -> Result<Claims, Rejection> {
        let parts = TokenParts::split(token).map_err(|_| Rejection::Format)?;
        let claims = self
            .codec
            .decode_parts(&parts)
            .map_err(|_| Rejection::Claims)?;

        if self.revocations.contains(&claims.jti) {
            return Err(Rejection::Revoked);
        }

        if claims.iss != self.settings.issuer {
            return Err(Rejection::Issuer);
        }

        if !self.codec.verify_parts(&parts) {
            return Err(Rejection::Signature);
        }

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(Rejection::Expired);
        }

        Ok(claims)
    }

    /// Read the subject of a token that already passed validation.
    ///
    /// # Errors
    /// * `Format` - Token cannot be parsed
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.codec.decode(token).map(|claims| claims.sub)
    }

    /// Read the roles of a token that already passed validation.
    ///
    /// Refresh tokens yield an empty list.
    ///
    /// # Errors
    /// * `Format` - Token cannot be parsed
    pub fn extract_roles(&self, token: &str) -> Result<Vec<String>, TokenError> {
        self.codec
            .decode(token)
            .map(|claims| claims.roles().to_vec())
    }

    /// Revoke a token until its natural expiry.
    ///
    /// Unparseable tokens are logged and ignored.
    pub fn revoke(&self, token: &str) {
        self.try_revoke(token);
    }

    /// Revoke a token and report whether this call was the one that did it.
    ///
    /// The check and the insert happen under one lock, so among concurrent
    /// callers presenting the same token exactly one gets `true`. Use it to
    /// spend single-use tokens.
    ///
    /// # Returns
    /// `false` if the token was already revoked or cannot be parsed
    pub fn try_revoke(&self, token: &str) -> bool {
        match self.codec.decode(token) {
            Ok(claims) => {
                let revoked = self.revocations.put(claims.jti.clone(), claims.exp);
                if revoked {
                    tracing::info!(jti = %claims.jti, exp = claims.exp, "Token revoked");
                } else {
                    tracing::debug!(jti = %claims.jti, "Token already revoked");
                }
                revoked
            }
            Err(e) => {
                tracing::warn!("Failed to revoke token: {}", e);
                false
            }
        }
    }

    /// Check the revocation store for a token.
    ///
    /// Unparseable tokens count as revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        match self.codec.decode(token) {
            Ok(claims) => self.revocations.contains(&claims.jti),
            Err(_) => true,
        }
    }
}
