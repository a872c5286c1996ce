//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion into [`AppError`] and the single HTTP
//! rendering of it.

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("Invalid request body: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Internal server error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Internal server error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Renders every error as `{"message": ...}` with the status of its kind.
///
/// Only the public message is written; `source` never leaves the process.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "message": self.message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\"email\":").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_data_error_conversion() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Login {
            email: String,
        }

        let json_err = serde_json::from_value::<Login>(serde_json::json!({ "email": 42 }))
            .unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_body_is_message_only() {
        use axum::response::IntoResponse;

        let io_err = std::io::Error::other("secret internals");
        let response = AppError::internal("Internal server error")
            .with_source(io_err)
            .into_response();
        assert_eq!(response.status().as_u16(), 500);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Internal server error" }));
    }
}
