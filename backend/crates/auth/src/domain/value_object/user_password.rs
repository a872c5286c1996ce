//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! - [`RawPassword`] is a password being chosen at registration. It must
//!   pass the policy.
//! - [`UserPassword`] is the stored Argon2id hash.
//!
//! Login never builds a `RawPassword`: it compares the submitted string
//! directly through [`UserPassword::matches`], which cannot fail.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{self, ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input. Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, enforcing the password policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {min} characters"))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {max} characters"))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
            PasswordPolicyError::CommonPattern => AppError::bad_request(
                "Password is too common or follows a predictable pattern",
            ),
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password in Argon2id PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AppError::internal("Internal server error").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Restore from the PHC string stored in the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Internal server error").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Compare a submitted password against an optional stored hash.
    ///
    /// `None` means the account has no local password and never matches.
    pub fn matches(plain: &str, stored: Option<&UserPassword>, pepper: Option<&[u8]>) -> bool {
        password::matches(plain, stored.map(|p| &p.0), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
