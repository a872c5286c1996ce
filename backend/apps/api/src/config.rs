//! Server Configuration
//!
//! Everything the binary reads from the environment (after `.env`).

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::{DEFAULT_TOKEN_TTL, parse_ttl};
use axum::http::HeaderValue;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` selects the in-memory user store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("HOST is not an IP address: {raw}"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let token_ttl = match get("JWT_EXPIRES_IN") {
            Some(raw) => match parse_ttl(&raw) {
                Some(ttl) => ttl,
                None => bail!("JWT_EXPIRES_IN is not a duration (e.g. 30d, 12h, 3600): {raw}"),
            },
            None => DEFAULT_TOKEN_TTL,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("FRONTEND_ORIGINS has an invalid origin: {origin}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let auth = AuthConfig::default()
            .with_jwt_secret(get("JWT_SECRET"))
            .with_token_ttl(token_ttl)
            .with_pepper(get("PASSWORD_PEPPER").map(String::into_bytes));

        Ok(Self {
            host,
            port,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            frontend_origins,
            auth,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.auth.token_ttl, DEFAULT_TOKEN_TTL);
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/checkin"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "12h"),
            ("PASSWORD_PEPPER", "pep"),
            ("FRONTEND_ORIGINS", "https://checkin.example, https://admin.checkin.example"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/checkin"));
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.auth.token_ttl, Duration::from_secs(12 * 3600));
        assert_eq!(config.auth.pepper(), Some(&b"pep"[..]));
        assert_eq!(config.frontend_origins[1], "https://admin.checkin.example");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = load(&[("JWT_SECRET", "  "), ("DATABASE_URL", "")]).unwrap();
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("HOST", "localhost:5000")]).is_err());
        assert!(load(&[("JWT_EXPIRES_IN", "forever")]).is_err());
        assert!(load(&[("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
        assert!(load(&[("FRONTEND_ORIGINS", "https://ok.example,bad\norigin")]).is_err());
    }
}
