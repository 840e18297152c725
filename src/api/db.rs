//! Schema bootstrap and query deadline helpers.
//!
//! Every statement here is idempotent so the server can be pointed at an
//! empty database and come up ready to serve.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::{future::Future, time::Duration};
use tracing::{instrument, Instrument};

/// Upper bound for any single database call.
pub(crate) const QUERY_DEADLINE: Duration = Duration::from_secs(5);

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user',
        subscription_status TEXT NOT NULL DEFAULT 'inactive',
        subscription_plan_id UUID,
        subscription_ends_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS words (
        id UUID PRIMARY KEY,
        sub_term TEXT NOT NULL,
        japanese TEXT NOT NULL,
        myanmar TEXT NOT NULL,
        english TEXT NOT NULL,
        image_url TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS user_favorites (
        user_id UUID NOT NULL,
        word_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, word_id),
        CONSTRAINT user_favorites_user_fk FOREIGN KEY (user_id)
            REFERENCES users (id) ON DELETE CASCADE,
        CONSTRAINT user_favorites_word_fk FOREIGN KEY (word_id)
            REFERENCES words (id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS subscription_prices (
        id UUID PRIMARY KEY,
        header TEXT NOT NULL,
        searches_left BIGINT NOT NULL,
        discount DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
];

/// Create the tables the service needs if they do not exist yet.
#[instrument(skip(pool))]
pub(crate) async fn bootstrap(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE TABLE"
        );

        bounded(sqlx::query(statement).execute(pool).instrument(span))
            .await?
            .context("Failed to run schema statement")?;
    }

    Ok(())
}

/// Wrap a database future with [`QUERY_DEADLINE`].
///
/// The inner `Result` is left intact so callers can still inspect
/// driver errors (unique or foreign key violations).
pub(crate) async fn bounded<F>(fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::time::timeout(QUERY_DEADLINE, fut)
        .await
        .context("Database call exceeded deadline")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_value_through() {
        let value = bounded(async { 7_u8 }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_bounded_keeps_inner_error_inspectable() {
        let inner: Result<(), &str> = Err("boom");
        let outcome = bounded(async move { inner }).await.unwrap();
        assert_eq!(outcome, Err("boom"));
    }

    #[test]
    fn test_schema_statements_are_idempotent() {
        for statement in SCHEMA {
            assert!(statement.starts_with("CREATE TABLE IF NOT EXISTS"));
        }
    }
}
