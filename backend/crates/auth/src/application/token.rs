//! Bearer Token Service
//!
//! Issues and verifies HS256 JWTs carrying `{id, role, iat, exp}`.
//! Without a configured secret both directions fail with
//! [`AuthError::Configuration`]; no unsigned token is ever produced.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID. Optional on decode so a token without it is rejected
    /// as invalid rather than as malformed JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Identity decoded from a valid token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub role: UserRole,
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Token issuer/verifier
#[derive(Clone)]
pub struct TokenService {
    keys: Option<Keys>,
    ttl_secs: i64,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let keys = config.jwt_secret.as_deref().map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        // A token is dead the second `exp` passes
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys,
            ttl_secs: config.token_ttl_secs(),
            validation,
        }
    }

    /// Fail early when no secret is configured
    pub fn ensure_configured(&self) -> AuthResult<()> {
        self.keys.as_ref().map(|_| ()).ok_or(AuthError::Configuration)
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: &UserId, role: UserRole) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: Some(user_id.to_string()),
            role,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &TokenClaims) -> AuthResult<String> {
        let keys = self.keys.as_ref().ok_or(AuthError::Configuration)?;

        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and decode its identity
    pub fn verify(&self, token: &str) -> AuthResult<TokenIdentity> {
        let keys = self.keys.as_ref().ok_or(AuthError::Configuration)?;

        let data = decode::<TokenClaims>(token, &keys.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AuthError::InvalidToken
        })?;

        let user_id = data
            .claims
            .id
            .as_deref()
            .and_then(|id| id.parse::<UserId>().ok())
            .ok_or(AuthError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::development())
    }

    #[test]
    fn test_issue_then_verify_every_role() {
        let tokens = service();

        for role in UserRole::ALL {
            let user_id = UserId::new();
            let token = tokens.issue(&user_id, role).unwrap();
            let identity = tokens.verify(&token).unwrap();

            assert_eq!(identity, TokenIdentity { user_id, role });
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: Some(UserId::new().to_string()),
            role: UserRole::Student,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = tokens.encode(&claims).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_just_expired_token_rejected() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: Some(UserId::new().to_string()),
            role: UserRole::Consultant,
            iat: now - 600,
            exp: now - 5,
        };
        let token = tokens.encode(&claims).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let ours = service();
        let theirs = service();
        let token = theirs.issue(&UserId::new(), UserRole::Admin).unwrap();

        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_corrupted_token_rejected() {
        let tokens = service();
        let token = tokens.issue(&UserId::new(), UserRole::Student).unwrap();

        let mut corrupted = token.clone();
        corrupted.truncate(token.len() - 4);
        assert!(matches!(tokens.verify(&corrupted), Err(AuthError::InvalidToken)));
        assert!(matches!(tokens.verify("not.a.jwt"), Err(AuthError::InvalidToken)));
        assert!(matches!(tokens.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_missing_or_bad_id_rejected() {
        let tokens = service();
        let now = Utc::now().timestamp();

        let no_id = TokenClaims {
            id: None,
            role: UserRole::Student,
            iat: now,
            exp: now + 60,
        };
        let token = tokens.encode(&no_id).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));

        let bad_id = TokenClaims {
            id: Some("not-a-uuid".to_string()),
            ..no_id
        };
        let token = tokens.encode(&bad_id).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_unknown_role_rejected() {
        #[derive(Serialize)]
        struct LooseClaims {
            id: String,
            role: &'static str,
            iat: i64,
            exp: i64,
        }

        let config = AuthConfig::development();
        let tokens = TokenService::new(&config);
        let secret = config.jwt_secret.unwrap();
        let now = Utc::now().timestamp();
        let claims = LooseClaims {
            id: UserId::new().to_string(),
            role: "Superuser",
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let tokens = TokenService::new(&AuthConfig::default());

        assert!(matches!(
            tokens.issue(&UserId::new(), UserRole::Student),
            Err(AuthError::Configuration)
        ));
        assert!(matches!(tokens.verify("a.b.c"), Err(AuthError::Configuration)));
        assert!(matches!(tokens.ensure_configured(), Err(AuthError::Configuration)));
    }
}
