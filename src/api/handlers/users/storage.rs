use super::types::{AccountResponse, SubscriptionSnapshot, SubscriptionStatus};
use crate::api::{db::bounded, handlers::auth::types::Role};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{Instrument, instrument};
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, role, subscription_status, \
     subscription_plan_id, subscription_ends_at, created_at, updated_at";

/// One row of the users table. Storage-only: handlers convert it into an
/// [`AccountResponse`] before anything is serialized.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub subscription_status: String,
    pub subscription_plan_id: Option<Uuid>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRow {
    pub(crate) fn role(&self) -> Result<Role> {
        Role::parse(&self.role).ok_or_else(|| anyhow!("Unknown role in storage: {}", self.role))
    }

    pub(crate) fn subscription(&self) -> Result<SubscriptionSnapshot> {
        let status = SubscriptionStatus::parse(&self.subscription_status).ok_or_else(|| {
            anyhow!(
                "Unknown subscription status in storage: {}",
                self.subscription_status
            )
        })?;

        Ok(SubscriptionSnapshot {
            status,
            plan_id: self.subscription_plan_id,
            end_date: self.subscription_ends_at,
        })
    }

    pub(crate) fn into_response_with_favorites(
        self,
        favorites: Option<Vec<Uuid>>,
    ) -> Result<AccountResponse> {
        let role = self.role()?;
        let subscription = self.subscription()?;

        Ok(AccountResponse {
            id: self.id,
            email: self.email,
            role,
            subscription,
            favorites,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[instrument(skip(pool))]
pub(crate) async fn fetch_account(pool: &PgPool, id: Uuid) -> Result<Option<AccountRow>> {
    let query = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to fetch account")
}

#[instrument(skip(pool, email))]
pub(crate) async fn fetch_account_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AccountRow>> {
    let query = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to fetch account by email")
}

/// Returns false when the account disappeared between auth and update.
#[instrument(skip(pool, password_hash))]
pub(crate) async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<bool> {
    let query = "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = %query
    );

    let result = bounded(
        sqlx::query(query)
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to update password")?;

    Ok(result.rows_affected() > 0)
}

#[instrument(skip(pool))]
pub(crate) async fn delete_account(pool: &PgPool, id: Uuid) -> Result<bool> {
    let query = "DELETE FROM users WHERE id = $1";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = %query
    );

    let result = bounded(sqlx::query(query).bind(id).execute(pool).instrument(span))
        .await?
        .context("Failed to delete account")?;

    Ok(result.rows_affected() > 0)
}

#[instrument(skip(pool))]
pub(crate) async fn list_active_subscribers(pool: &PgPool) -> Result<Vec<AccountRow>> {
    let query = format!(
        "SELECT {ACCOUNT_COLUMNS} FROM users \
         WHERE subscription_status = 'active' ORDER BY created_at"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, AccountRow>(&query)
            .fetch_all(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to list active subscribers")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str, status: &str) -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            email: "a@b.co".into(),
            password_hash: "$2b$04$hash".into(),
            role: role.into(),
            subscription_status: status.into(),
            subscription_plan_id: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let account = row("admin", "trial")
            .into_response_with_favorites(Some(vec![Uuid::nil()]))
            .unwrap();
        assert_eq!(account.role, Role::Admin);
        assert_eq!(account.subscription.status, SubscriptionStatus::Trial);
        assert_eq!(account.favorites.as_deref(), Some(&[Uuid::nil()][..]));
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        assert!(row("root", "active").into_response_with_favorites(None).is_err());
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(row("user", "paused").into_response_with_favorites(None).is_err());
    }
}
