use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const FULL_NAME_MAX_LENGTH: usize = 100;

/// Display name shown on the counselor dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        // Collapse internal runs of whitespace
        let name = name.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");

        if name.is_empty() {
            return Err(AppError::bad_request("Full name cannot be empty"));
        }

        if name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at most {FULL_NAME_MAX_LENGTH} characters"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Full name contains invalid characters"));
        }

        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
