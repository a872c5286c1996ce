//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, ListUsersUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase, TokenService,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, ListUsersQuery, LoginRequest, RegisterRequest, UserResponse,
};
use crate::presentation::extract::ValidatedJson;

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self::from_shared(Arc::new(repo), config)
    }

    pub fn from_shared(repo: Arc<R>, config: AuthConfig) -> Self {
        let tokens = TokenService::new(&config);
        Self {
            repo,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let input = RegisterInput {
        full_name: req.full_name,
        email: req.email,
        username: req.username,
        student_number: req.student_number,
        password: req.password,
        role: req.role,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            user: UserResponse::from(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me(user: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user.profile))
}

// ============================================================================
// List Users
// ============================================================================

/// GET /api/users?role=<Role>
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;

    let use_case = ListUsersUseCase::new(state.repo.clone());
    let users = use_case.execute(query.role).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}
