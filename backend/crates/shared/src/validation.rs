//! Request Payload Validation
//!
//! Required-field presence checking for inbound JSON bodies.
//!
//! A field counts as missing when it is absent, `null`, or a string that is
//! empty after trimming. Every missing field is reported in one
//! [`ValidationError`], in the order the fields were declared, so a client
//! can fix a whole form in a single round-trip.

use serde_json::Value;
use std::fmt;

/// Declares the fields a request body must carry.
///
/// Implemented by request DTOs; the HTTP extractor runs
/// [`require_fields`] with this list before deserializing.
pub trait RequiredFields {
    const REQUIRED_FIELDS: &'static [&'static str];
}

/// A single violated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} is required"),
        }
    }
}

/// Aggregated validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the violated fields, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationError {}

/// Check that every field in `fields` is present in `payload`.
///
/// Non-object payloads are treated as empty objects.
pub fn require_fields(payload: &Value, fields: &[&str]) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = fields
        .iter()
        .filter(|field| is_missing(payload.get(**field)))
        .map(|field| FieldViolation::missing(field))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_present() {
        let payload = json!({ "email": "a@b.io", "password": "secret" });
        assert!(require_fields(&payload, &["email", "password"]).is_ok());
    }

    #[test]
    fn test_reports_every_missing_field() {
        let payload = json!({});
        let err = require_fields(&payload, &["email", "password"]).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["email", "password"]);
        assert_eq!(err.to_string(), "email is required, password is required");
    }

    #[test]
    fn test_null_and_blank_count_as_missing() {
        let payload = json!({ "email": null, "password": "   ", "username": "jo" });
        let err = require_fields(&payload, &["username", "email", "password"]).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["email", "password"]);
    }

    #[test]
    fn test_non_string_values_are_present() {
        let payload = json!({ "age": 0, "active": false });
        assert!(require_fields(&payload, &["age", "active"]).is_ok());
    }

    #[test]
    fn test_non_object_payload() {
        let err = require_fields(&json!([1, 2]), &["email"]).unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }
}
