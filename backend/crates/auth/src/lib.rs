//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL and in-memory user stores
//! - `presentation/` - HTTP handlers, DTOs, extractors, middleware, routers
//!
//! ## Features
//! - Account registration (full name, email, username, student number)
//! - Email + password login returning an HS256 bearer token
//! - Per-request user re-load from the bearer token
//! - Role-based access (Admin, Consultant, Student)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Tokens carry `{id, role}`; the stored role always wins
//! - Deleted users are locked out immediately, even with a valid token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticatedUser, TokenService};
pub use error::{AuthError, AuthResult, UniqueField};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::{AuthAppState, auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
