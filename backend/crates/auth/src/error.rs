//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Each variant carries its own
//! [`ErrorKind`]; a failure is never re-labelled on its way out.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Field covered by a uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum UniqueField {
    #[display("email")]
    Email,
    #[display("username")]
    Username,
    #[display("studentNumber")]
    StudentNumber,
    #[display("googleId")]
    GoogleId,
}

impl UniqueField {
    /// Map a Postgres unique constraint name to its field
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "users_email_key" => Some(UniqueField::Email),
            "users_username_canonical_key" => Some(UniqueField::Username),
            "users_student_number_key" => Some(UniqueField::StudentNumber),
            "users_google_id_key" => Some(UniqueField::GoogleId),
            _ => None,
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header
    #[error("no token")]
    MissingToken,

    /// Token failed signature, expiry or claim checks
    #[error("invalid token")]
    InvalidToken,

    /// Token is valid but its user no longer exists
    #[error("user not found")]
    UserNotFound,

    /// Unknown email, wrong password or no local password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Authenticated, but the role is not allowed here
    #[error("forbidden")]
    Forbidden,

    /// Registration asked for a role that cannot be self-assigned
    #[error("role {0} cannot be self-assigned")]
    RoleNotSelfAssignable(crate::domain::value_object::user_role::UserRole),

    /// Unique field collision
    #[error("{0} already in use")]
    Duplicate(UniqueField),

    /// Token secret missing
    #[error("JWT secret is not configured")]
    Configuration,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Already-classified application error (validation, policy)
    #[error(transparent)]
    App(#[from] AppError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UserNotFound
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Forbidden | AuthError::RoleNotSelfAssignable(_) => ErrorKind::Forbidden,
            AuthError::Duplicate(_) => ErrorKind::Conflict,
            AuthError::Configuration | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            AuthError::App(e) => e.kind(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Message safe to return to the client
    fn public_message(&self) -> String {
        match self {
            AuthError::Configuration => "Server configuration error".to_string(),
            AuthError::Database(_) | AuthError::Internal(_) => {
                "Internal server error".to_string()
            }
            AuthError::App(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Configuration => {
                tracing::error!("JWT_SECRET is missing; tokens cannot be issued or verified");
            }
            AuthError::App(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "Auth application error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::UserNotFound => {
                tracing::warn!(error = %self, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::App(e) => e,
            other => {
                let kind = other.kind();
                let message = other.public_message();
                match other {
                    AuthError::Database(e) => AppError::new(kind, message).with_source(e),
                    _ => AppError::new(kind, message),
                }
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<kernel::validation::ValidationError> for AuthError {
    fn from(err: kernel::validation::ValidationError) -> Self {
        AuthError::App(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;

    #[test]
    fn test_unauthorized_variants() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::UserNotFound,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(err.status_code(), 401);
        }
        assert_eq!(AuthError::MissingToken.to_string(), "no token");
        assert_eq!(AuthError::UserNotFound.to_string(), "user not found");
    }

    #[test]
    fn test_configuration_is_server_error() {
        let err = AuthError::Configuration;
        assert_eq!(err.status_code(), 500);

        let app = err.into_app_error();
        assert_eq!(app.message(), "Server configuration error");
    }

    #[test]
    fn test_duplicate_names_field() {
        let err = AuthError::Duplicate(UniqueField::StudentNumber);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.to_string(), "studentNumber already in use");
    }

    #[test]
    fn test_role_not_self_assignable() {
        let err = AuthError::RoleNotSelfAssignable(UserRole::Admin);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_app_error_keeps_kind() {
        let err: AuthError = AppError::bad_request("email is required").into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.into_app_error().message(), "email is required");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let app = AuthError::Internal("pool exploded".to_string()).into_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_constraint_mapping() {
        assert_eq!(
            UniqueField::from_constraint("users_email_key"),
            Some(UniqueField::Email)
        );
        assert_eq!(
            UniqueField::from_constraint("users_username_canonical_key"),
            Some(UniqueField::Username)
        );
        assert_eq!(
            UniqueField::from_constraint("users_google_id_key"),
            Some(UniqueField::GoogleId)
        );
        assert_eq!(UniqueField::from_constraint("users_pkey"), None);

        let err = AuthError::Duplicate(UniqueField::GoogleId);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.to_string(), "googleId already in use");
    }
}
