use std::fmt;

use crate::domain::account::errors::RoleError;
use crate::domain::session::models::EmailAddress;

/// Prefix carried by every stored role name.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Role name type
///
/// Stored upper-cased with the `ROLE_` prefix, so `admin`, `ADMIN` and
/// `ROLE_ADMIN` are the same role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    /// Create a new normalized role name.
    ///
    /// # Arguments
    /// * `name` - Raw role name, with or without the `ROLE_` prefix
    ///
    /// # Returns
    /// Upper-cased, prefixed role name
    ///
    /// # Errors
    /// * `Empty` - Name is blank or only the prefix
    /// * `InvalidCharacters` - Name contains anything but letters, digits or `_`
    pub fn new(name: &str) -> Result<Self, RoleError> {
        let upper = name.trim().to_uppercase();
        let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);

        if bare.is_empty() {
            return Err(RoleError::Empty);
        }

        if !bare
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(RoleError::InvalidCharacters(name.to_string()));
        }

        Ok(RoleName(format!("{}{}", ROLE_PREFIX, bare)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command to create an account with validated fields
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub email: EmailAddress,
    /// Plain text password (will be hashed by service)
    pub password: String,
    pub roles: Vec<RoleName>,
}

impl CreateAccountCommand {
    pub fn new(email: EmailAddress, password: String, roles: Vec<RoleName>) -> Self {
        Self {
            email,
            password,
            roles,
        }
    }
}

/// Account as exposed after creation; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub roles: Vec<String>,
}
