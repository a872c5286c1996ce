//! Router Assembly
//!
//! Mounts the auth routers, the liveness probe and the JSON 404, then
//! wraps everything in panic catching, request tracing and CORS.

use std::any::Any;

use auth::{AuthAppState, auth_router, domain::repository::UserRepository, users_router};
use axum::http::{HeaderValue, Method, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use kernel::error::app_error::AppError;
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full application router
pub fn build_app<R>(state: AuthAppState<R>, frontend_origins: &[HeaderValue]) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/", get(liveness))
        .nest("/api/auth", auth_router(state.clone()))
        .nest("/api/users", users_router(state))
        .fallback(not_found);

    with_layers(routes, frontend_origins)
}

fn with_layers(router: Router, frontend_origins: &[HeaderValue]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(frontend_origins.to_vec())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// GET /
async fn liveness() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::not_found(format!("Not Found - {}", uri.path()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Handler panicked");

    AppError::internal("Internal server error").into_response()
}
