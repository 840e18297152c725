use super::types::{PricingRequest, PricingResponse};
use crate::api::db::bounded;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{Instrument, instrument};
use uuid::Uuid;

const PRICING_COLUMNS: &str = "id, header, searches_left, discount, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PricingRow {
    pub id: Uuid,
    pub header: String,
    pub searches_left: i64,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PricingRow> for PricingResponse {
    fn from(row: PricingRow) -> Self {
        Self {
            id: row.id,
            header: row.header,
            searches_left: row.searches_left,
            discount: row.discount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[instrument(skip(pool))]
pub(crate) async fn fetch_prices(pool: &PgPool) -> Result<Vec<PricingRow>> {
    let query = format!("SELECT {PRICING_COLUMNS} FROM subscription_prices ORDER BY created_at");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, PricingRow>(&query)
            .fetch_all(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to fetch prices")
}

/// Update the oldest pricing row in place, or insert the first one.
/// The table is configuration, not a ledger, so it stays single-row in
/// practice.
#[instrument(skip(pool, pricing))]
pub(crate) async fn upsert_prices(pool: &PgPool, pricing: &PricingRequest) -> Result<PricingRow> {
    let update = format!(
        "UPDATE subscription_prices SET header = $1, searches_left = $2, discount = $3, \
         updated_at = NOW() \
         WHERE id = (SELECT id FROM subscription_prices ORDER BY created_at LIMIT 1) \
         RETURNING {PRICING_COLUMNS}"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = %update
    );

    let updated = bounded(
        sqlx::query_as::<_, PricingRow>(&update)
            .bind(&pricing.header)
            .bind(pricing.searches_left)
            .bind(pricing.discount)
            .fetch_optional(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to update prices")?;

    if let Some(row) = updated {
        return Ok(row);
    }

    let insert = format!(
        "INSERT INTO subscription_prices (id, header, searches_left, discount) \
         VALUES ($1, $2, $3, $4) RETURNING {PRICING_COLUMNS}"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %insert
    );

    bounded(
        sqlx::query_as::<_, PricingRow>(&insert)
            .bind(Uuid::new_v4())
            .bind(&pricing.header)
            .bind(pricing.searches_left)
            .bind(pricing.discount)
            .fetch_one(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to insert prices")
}
