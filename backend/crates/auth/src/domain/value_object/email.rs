//! Email Value Object
//!
//! Represents a validated, lower-cased email address. Email is the login
//! identifier, so two spellings differing only in case are the same account.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Invalid email format"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
            return false;
        }

        if local.chars().any(char::is_whitespace) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') || domain.contains("..") {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("student@uni.ac.za").is_ok());
        assert!(Email::new("first.last+wellness@example.co.uk").is_ok());
        assert!(Email::new("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
        assert!(Email::new("studentexample.com").is_err());
        assert!(Email::new("student@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("student@@example.com").is_err());
        assert!(Email::new("student@example").is_err());
        assert!(Email::new("student@example..com").is_err());
        assert!(Email::new("student@-example.com").is_err());
        assert!(Email::new("stu dent@example.com").is_err());
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(email).is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("Student@Example.COM").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
    }
}
