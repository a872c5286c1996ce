//! Bearer Credential Extraction
//!
//! Parses `Authorization: Bearer <token>` headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Why no bearer token could be taken from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header is not valid UTF-8")]
    NotUtf8,

    #[error("Authorization header is not of the form `Bearer <token>`")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme must be exactly `Bearer` followed by a single space and a
/// non-empty token with no further whitespace.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::NotUtf8)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::Malformed)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}

/// Build an `Authorization` header value for a token
pub fn bearer_header_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_malformed_headers() {
        for value in ["Bearer", "Bearer ", "bearer abc", "Basic abc", "Bearer a b", "abc"] {
            assert_eq!(
                extract_bearer(&headers_with(value)),
                Err(BearerError::Malformed),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bearer_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&bearer_header_value("tok")).unwrap(),
        );
        assert_eq!(extract_bearer(&headers), Ok("tok"));
    }
}
