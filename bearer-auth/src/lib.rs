//! Bearer token authentication core
//!
//! Provides the pieces a service needs to log users in and guard requests:
//! - Compact HS512 tokens (access and refresh) with a hand-rolled codec
//! - Validation pipeline with issuer, signature, expiry and revocation checks
//! - In-memory revocation store with a background sweeper
//! - Credential authenticator over pluggable user store and password hasher
//! - Argon2id password hashing
//!
//! Services supply their own `UserStore` adapter and wire these together.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use bearer_auth::{Argon2PasswordHasher, PasswordHasher};
//!
//! let hasher = Argon2PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use bearer_auth::{RevocationStore, TokenService, TokenSettings};
//!
//! let revocations = Arc::new(RevocationStore::new());
//! let tokens = TokenService::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     TokenSettings::default(),
//!     revocations,
//! )
//! .unwrap();
//!
//! let roles = vec!["ADMIN".to_string()];
//! let token = tokens.issue_access("alice@example.com", &roles).unwrap();
//! assert!(tokens.validate(&token));
//! assert_eq!(tokens.extract_subject(&token).unwrap(), "alice@example.com");
//!
//! tokens.revoke(&token);
//! assert!(!tokens.validate(&token));
//! ```
//!
//! ## Short secrets are refused
//! ```
//! use std::sync::Arc;
//!
//! use bearer_auth::{ConfigError, RevocationStore, TokenService, TokenSettings};
//!
//! let result = TokenService::new(
//!     b"too-short",
//!     TokenSettings::default(),
//!     Arc::new(RevocationStore::new()),
//! );
//! assert!(matches!(result, Err(ConfigError::SecretTooShort { .. })));
//! ```

pub mod authenticator;
pub mod password;
pub mod ports;
pub mod revocation;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::VerifiedIdentity;
pub use password::Argon2PasswordHasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use ports::UserRecord;
pub use ports::UserStore;
pub use ports::UserStoreError;
pub use revocation::RevocationStore;
pub use revocation::SweeperHandle;
pub use token::resolve_bearer;
pub use token::Claims;
pub use token::ConfigError;
pub use token::TokenError;
pub use token::TokenKind;
pub use token::TokenPair;
pub use token::TokenService;
pub use token::TokenSettings;
