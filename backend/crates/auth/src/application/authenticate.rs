//! Authenticate Use Case
//!
//! Resolves a bearer token to the current user record.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Identity bound to an authorized request
///
/// `role` is the stored role, so a demotion takes effect on the next
/// request even while older tokens are still valid.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: UserRole,
    pub profile: User,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let identity = self.tokens.verify(token)?;

        let user = self
            .user_repo
            .find_by_id(&identity.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.user_role != identity.role {
            tracing::debug!(
                user_id = %user.user_id,
                token_role = %identity.role,
                stored_role = %user.user_role,
                "Token role differs from stored role"
            );
        }

        Ok(AuthenticatedUser {
            id: user.user_id,
            role: user.user_role,
            profile: user,
        })
    }
}
