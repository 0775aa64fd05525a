//! Signed access tokens.
//!
//! Tokens are HS256 JWTs whose payload is `{id, role, iat, exp}`. Any holder of the
//! shared secret can verify them without a store lookup.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Role, User};
use super::Actor;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(String),
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issues a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = unix_now();
        self.encode(&Claims {
            id: user.id.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl.as_secs(),
        })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|error| TokenError::Encode(error.to_string()))
    }

    /// Checks signature and expiry, returning the actor the token speaks for.
    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|error| TokenError::Invalid(error.to_string()))?;
        Ok(Actor {
            id: data.claims.id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: Role) -> User {
        User {
            id: "user_1".into(),
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = TokenService::new("secret", Duration::from_secs(3600));
        let token = tokens.issue(&user(Role::Admin)).unwrap();
        let actor = tokens.verify(&token).unwrap();
        assert_eq!(actor, Actor { id: "user_1".into(), role: Role::Admin });
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new("secret", Duration::from_secs(3600));
        let other = TokenService::new("another secret", Duration::from_secs(3600));
        let token = issuer.issue(&user(Role::Staff)).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new("secret", Duration::from_secs(3600));
        let now = unix_now();
        let token = tokens
            .encode(&Claims { id: "user_1".into(), role: Role::Staff, iat: now - 7200, exp: now - 3600 })
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let tokens = TokenService::new("secret", Duration::from_secs(3600));
        assert!(tokens.verify("abc.def.ghi").is_err());
    }
}
