//! Auth Middleware
//!
//! - [`require_auth`] turns a bearer token into an [`AuthenticatedUser`]
//!   bound to the request.
//! - [`require_role`] admits only some roles. It must run after
//!   `require_auth`.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::{AuthenticateUseCase, AuthenticatedUser};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid bearer token for a user that still exists
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers())
        .map_err(|e| {
            tracing::debug!(reason = %e, "No bearer token");
            AuthError::MissingToken
        })?
        .to_owned();

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let user = use_case.execute(&token).await?;

    tracing::debug!(user_id = %user.id, role = %user.role, "Request authenticated");

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Set of roles admitted by [`require_role`]. Admin is always admitted.
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard {
    allowed: &'static [UserRole],
}

impl RoleGuard {
    /// Admin and Consultant
    pub const STAFF: RoleGuard = RoleGuard::new(&[UserRole::Admin, UserRole::Consultant]);

    pub const fn new(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        role.is_admin() || self.allowed.contains(&role)
    }
}

/// Middleware that rejects identities outside the guard's role set
pub async fn require_role(
    State(guard): State<RoleGuard>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let role = req
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.role)
        .ok_or(AuthError::MissingToken)?;

    if !guard.allows(role) {
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
