use crate::api::{
    db::bounded,
    handlers::{is_unique_violation, users::storage::AccountRow},
};
use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{Instrument, instrument};
use uuid::Uuid;

#[derive(Debug)]
pub(crate) enum SignupOutcome {
    Created(AccountRow),
    /// Email already taken.
    Conflict,
}

/// Insert a fresh account with the `user` role and no subscription.
/// Uniqueness is enforced by the email constraint, not a read-then-write.
#[instrument(skip(pool, email, password_hash))]
pub(crate) async fn insert_account(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let query = "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, email, password_hash, role, subscription_status, \
         subscription_plan_id, subscription_ends_at, created_at, updated_at";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %query
    );

    let inserted = bounded(
        sqlx::query_as::<_, AccountRow>(query)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .instrument(span),
    )
    .await?;

    match inserted {
        Ok(row) => Ok(SignupOutcome::Created(row)),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("Failed to insert account"),
    }
}
