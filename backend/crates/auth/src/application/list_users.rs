//! List Users Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// List users use case (staff only; enforced by the role guard)
pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        let users = self.user_repo.list(role).await?;

        tracing::debug!(count = users.len(), role = ?role, "Listed users");

        Ok(users)
    }
}
