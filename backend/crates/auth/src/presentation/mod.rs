//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::ValidatedJson;
pub use handlers::AuthAppState;
pub use middleware::{RoleGuard, require_auth, require_role};
pub use router::{auth_router, users_router};
