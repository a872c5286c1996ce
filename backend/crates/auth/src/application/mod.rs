//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod list_users;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use config::AuthConfig;
pub use list_users::ListUsersUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{AuthOutput, RegisterInput, RegisterUseCase};
pub use token::{TokenClaims, TokenIdentity, TokenService};
