//! Auth Routers

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{RoleGuard, require_auth, require_role};

/// Routes mounted at `/api/auth`
///
/// - `POST /register`
/// - `POST /login`
/// - `GET /me` (bearer)
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}

/// Routes mounted at `/api/users` (bearer, Admin or Consultant)
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_users::<R>))
        // Layers run bottom-up: authenticate first, then check the role
        .route_layer(middleware::from_fn_with_state(RoleGuard::STAFF, require_role))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ))
        .with_state(state)
}
