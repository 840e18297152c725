//! Stateless bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the account id, role and expiry. There
//! is no revocation list: validation is a pure signature and expiry check.

use super::types::Role;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Sign a token for the given account.
pub fn issue(user_id: Uuid, role: Role, ttl: Duration, secret: &SecretString) -> Result<String> {
    let claims = Claims {
        sub: user_id,
        role,
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .context("Failed to sign token")
}

/// Check signature and expiry, returning the embedded claims.
pub fn validate(token: &str, secret: &SecretString) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("unit-test-signing-key")
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue(user_id, Role::User, Duration::hours(1), &secret()).unwrap();
        let claims = validate(&token, &secret()).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_admin_role_survives_round_trip() {
        let token = issue(Uuid::new_v4(), Role::Admin, Duration::hours(1), &secret()).unwrap();
        assert_eq!(validate(&token, &secret()).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue(Uuid::new_v4(), Role::User, Duration::hours(-1), &secret()).unwrap();
        assert_eq!(validate(&token, &secret()), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(Uuid::new_v4(), Role::User, Duration::hours(1), &secret()).unwrap();
        let other = SecretString::from("a-different-signing-key");
        assert_eq!(validate(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue(Uuid::new_v4(), Role::User, Duration::hours(1), &secret()).unwrap();
        let tampered = format!("{token}xx");
        assert_eq!(validate(&tampered, &secret()), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        assert_eq!(validate("", &secret()), Err(TokenError::Invalid));
        assert_eq!(validate("not.a.jwt", &secret()), Err(TokenError::Invalid));
    }
}
