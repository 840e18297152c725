use super::{
    state::AuthConfig,
    token::{self, TokenError},
    types::Role,
};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use uuid::Uuid;

/// The authenticated caller, as proven by a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

/// Gate for protected routes. Missing, malformed, invalid and expired
/// tokens all map to 401 so callers learn nothing about which it was.
pub fn require_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Principal, StatusCode> {
    let token = extract_bearer_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;

    match token::validate(token, config.jwt_secret()) {
        Ok(claims) => Ok(Principal {
            user_id: claims.sub,
            role: claims.role,
        }),
        Err(TokenError::Expired | TokenError::Invalid) => Err(StatusCode::UNAUTHORIZED),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
