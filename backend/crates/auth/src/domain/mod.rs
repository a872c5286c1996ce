//! Domain Layer
//!
//! Contains entities, value objects, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credential::Credential, user::User};
pub use repository::{LocalUserRepository, UserRepository};
