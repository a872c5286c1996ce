//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use auth::{AuthAppState, InMemoryUserRepository, PgUserRepository};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::build_app;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    if config.auth.jwt_secret.is_none() {
        tracing::error!("JWT_SECRET is not set; login, registration and protected routes will fail");
    }

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let state = AuthAppState::new(PgUserRepository::new(pool), config.auth.clone());
            build_app(state, &config.frontend_origins)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; using the in-memory user store");

            let state = AuthAppState::new(InMemoryUserRepository::new(), config.auth.clone());
            build_app(state, &config.frontend_origins)
        }
    };

    serve(app, config.socket_addr()).await
}

async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
