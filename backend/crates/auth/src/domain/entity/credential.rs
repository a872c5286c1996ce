//! Credential Entity
//!
//! Authentication material for a user.
//! Separated from the User entity to isolate sensitive data.

use crate::domain::value_object::{
    auth_provider::AuthProvider, user_id::UserId, user_password::UserPassword,
};

/// Credential entity
///
/// Locally registered accounts always carry a password hash. Accounts
/// created through Google may have none.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Reference to User
    pub user_id: UserId,
    /// Hashed password (local accounts)
    pub password_hash: Option<UserPassword>,
    /// Google subject id (federated accounts)
    pub google_id: Option<String>,
}

impl Credential {
    /// Credential for an account registered with a password
    pub fn local(user_id: UserId, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            password_hash: Some(password_hash),
            google_id: None,
        }
    }

    /// Credential for an account created through Google
    pub fn google(user_id: UserId, google_id: impl Into<String>) -> Self {
        Self {
            user_id,
            password_hash: None,
            google_id: Some(google_id.into()),
        }
    }

    pub fn provider(&self) -> AuthProvider {
        if self.google_id.is_some() && self.password_hash.is_none() {
            AuthProvider::Google
        } else {
            AuthProvider::Local
        }
    }

    /// Compare a submitted password with the stored hash.
    ///
    /// Always false for accounts without a password.
    pub fn matches(&self, plain: &str, pepper: Option<&[u8]>) -> bool {
        UserPassword::matches(plain, self.password_hash.as_ref(), pepper)
    }
}
