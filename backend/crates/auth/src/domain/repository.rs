//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::AuthResult;

/// User repository trait
///
/// Email, user name (canonical form) and student number are unique across
/// all records. A colliding `create` fails with
/// [`AuthError::Duplicate`](crate::error::AuthError::Duplicate) and leaves
/// the existing record untouched.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a user together with its credential
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    /// Find user by ID (profile only)
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by normalized email (profile only)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Load the credential of a user
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;

    /// List users, newest first, optionally filtered by role
    async fn list(&self, role: Option<UserRole>) -> AuthResult<Vec<User>>;
}
