//! Student Number Value Object
//!
//! Institution-issued identifier. Stored upper-cased so `s1234` and `S1234`
//! collide on the unique index.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const STUDENT_NUMBER_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentNumber(String);

impl StudentNumber {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim().to_ascii_uppercase();

        if value.is_empty() {
            return Err(AppError::bad_request("Student number cannot be empty"));
        }

        if value.len() > STUDENT_NUMBER_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Student number must be at most {STUDENT_NUMBER_MAX_LENGTH} characters"
            )));
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::bad_request(
                "Student number may only contain letters, digits and '-'",
            ));
        }

        Ok(Self(value))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
