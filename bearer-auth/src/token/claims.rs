use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Value of the `typ` claim on every minted token.
pub const TOKEN_TYPE: &str = "JWT";

/// Shape of a token: access tokens carry roles, refresh tokens carry the
/// `type` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claim set carried inside a token.
///
/// `sub`, `iss`, `exp` and `jti` are required, so a payload missing any of
/// them fails to decode instead of failing later at the point of use. `iat`
/// and `typ` are informational and default to `0` and `""` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal email)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token ID, used as the revocation key
    pub jti: String,

    /// Token format marker
    #[serde(default)]
    pub typ: String,

    /// Granted roles, access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    /// `REFRESH` on refresh tokens, absent on access tokens
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenKind>,
}

impl Claims {
    /// Build access token claims with a fresh `jti`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `roles` - Granted role names, order preserved
    /// * `issuer` - Issuer written into `iss`
    /// * `issued_at` - Issue instant
    /// * `ttl` - Lifetime added to `issued_at` to form `exp`
    pub fn access(
        subject: impl ToString,
        roles: Vec<String>,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            roles: Some(roles),
            token_type: None,
            ..Self::base(subject, issuer, issued_at, ttl)
        }
    }

    /// Build refresh token claims with a fresh `jti`.
    pub fn refresh(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            roles: None,
            token_type: Some(TokenKind::Refresh),
            ..Self::base(subject, issuer, issued_at, ttl)
        }
    }

    fn base(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
            typ: TOKEN_TYPE.to_string(),
            roles: None,
            token_type: None,
        }
    }

    /// Parse claims from payload JSON and check the access/refresh shape.
    ///
    /// # Errors
    /// * `Format` - Invalid JSON, missing required claim, or mixed shape
    pub fn from_json(payload: &[u8]) -> Result<Self, TokenError> {
        let claims: Claims = serde_json::from_slice(payload)
            .map_err(|e| TokenError::Format(format!("invalid claims: {}", e)))?;
        claims.check_shape()?;
        Ok(claims)
    }

    fn check_shape(&self) -> Result<(), TokenError> {
        match (&self.roles, self.token_type) {
            (Some(_), Some(_)) => Err(TokenError::Format(
                "token carries both roles and a type marker".to_string(),
            )),
            (_, Some(TokenKind::Access)) => Err(TokenError::Format(
                "access tokens do not carry a type marker".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Token shape; tokens without a `type` marker are access tokens.
    pub fn kind(&self) -> TokenKind {
        self.token_type.unwrap_or(TokenKind::Access)
    }

    /// Granted roles, empty for refresh tokens.
    pub fn roles(&self) -> &[String] {
        self.roles.as_deref().unwrap_or(&[])
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is expired from the `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
