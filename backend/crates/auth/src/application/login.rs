//! Login Use Case
//!
//! Verifies an email/password pair and issues a token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::AuthOutput;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            config,
            tokens,
        }
    }

    /// Unknown email, wrong password and accounts without a local
    /// password all fail with the same [`AuthError::InvalidCredentials`].
    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .user_repo
            .find_credential(&user.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !credential.matches(&input.password, self.config.pepper()) {
            tracing::debug!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.user_id, user.user_role)?;

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User logged in");

        Ok(AuthOutput { token, user })
    }
}
