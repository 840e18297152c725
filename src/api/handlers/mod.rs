pub mod auth;
pub mod favorites;
pub mod health;
pub mod subscriptions;
pub mod users;
pub mod words;

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use utoipa::ToSchema;

/// Plain `{"message": "..."}` body used by mutation endpoints.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Sanity check for the email shape, not full RFC 5322 validation.
pub fn valid_email(email: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
    });

    re.is_match(email)
}

/// Postgres unique_violation, SQLSTATE 23505.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

/// Postgres foreign_key_violation, SQLSTATE 23503. Returns the constraint
/// name so callers can tell which reference was missing.
pub(crate) fn foreign_key_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}
