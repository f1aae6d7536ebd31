pub mod claims;
pub mod clock;
pub mod codec;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TokenKind;
pub use clock::Clock;
pub use clock::SystemClock;
pub use codec::TokenCodec;
pub use errors::ConfigError;
pub use errors::TokenError;
pub use service::TokenPair;
pub use service::TokenService;
pub use service::TokenSettings;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// # Returns
/// The token, or `None` when the header is blank, uses another scheme, or
/// carries no token
pub fn resolve_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
