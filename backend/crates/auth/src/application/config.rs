//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default bearer token lifetime (30 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. `None` means issuing and verifying tokens
    /// fails with a configuration error.
    pub jwt_secret: Option<String>,
    /// Bearer token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::Rng;
        use rand::distr::Alphanumeric;

        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            jwt_secret: Some(secret),
            ..Default::default()
        }
    }

    /// Create config for development and tests
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Set the signing secret; blank secrets count as missing
    pub fn with_jwt_secret(mut self, secret: Option<String>) -> Self {
        self.jwt_secret = secret.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Token lifetime in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Parse a token lifetime such as `30d`, `12h`, `45m`, `90s` or `3600`.
///
/// Returns `None` for empty, zero, or unrecognised values.
pub fn parse_ttl(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let value: u64 = digits.parse().ok()?;
    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 24 * 3600,
        _ => return None,
    };

    match value.checked_mul(multiplier)? {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}
