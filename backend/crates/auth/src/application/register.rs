//! Register Use Case
//!
//! Creates a new locally-authenticated account and issues its first token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider,
    email::Email,
    full_name::FullName,
    student_number::StudentNumber,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub student_number: String,
    pub password: String,
    pub role: Option<UserRole>,
}

/// Output of register and login
#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        // Nothing is stored if a token could not be issued afterwards
        self.tokens.ensure_configured()?;

        let role = input.role.unwrap_or_default();
        if !role.is_self_assignable() {
            return Err(AuthError::RoleNotSelfAssignable(role));
        }

        let full_name = FullName::new(&input.full_name)?;
        let email = Email::new(input.email)?;
        let user_name = UserName::new(&input.username)?;
        let student_number = StudentNumber::new(&input.student_number)?;

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(
            full_name,
            email,
            user_name,
            student_number,
            role,
            AuthProvider::Local,
        );
        let credential = Credential::local(user.user_id, password_hash);

        self.user_repo.create(&user, &credential).await?;

        let token = self.tokens.issue(&user.user_id, user.user_role)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.user_role,
            "User registered"
        );

        Ok(AuthOutput { token, user })
    }
}
