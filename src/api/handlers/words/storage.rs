use super::types::{WordRequest, WordResponse};
use crate::api::db::bounded;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{Instrument, instrument};
use uuid::Uuid;

const WORD_COLUMNS: &str =
    "id, sub_term, japanese, myanmar, english, image_url, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WordRow {
    pub id: Uuid,
    pub sub_term: String,
    pub japanese: String,
    pub myanmar: String,
    pub english: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WordRow> for WordResponse {
    fn from(row: WordRow) -> Self {
        Self {
            id: row.id,
            sub_term: row.sub_term,
            japanese: row.japanese,
            myanmar: row.myanmar,
            english: row.english,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Case-insensitive substring match across all four term columns.
#[instrument(skip(pool, term))]
pub(crate) async fn search_words(pool: &PgPool, term: &str) -> Result<Vec<WordRow>> {
    let query = format!(
        "SELECT {WORD_COLUMNS} FROM words \
         WHERE sub_term ILIKE $1 OR japanese ILIKE $1 OR myanmar ILIKE $1 OR english ILIKE $1 \
         ORDER BY created_at DESC"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    let pattern = format!("%{}%", escape_like(term));

    bounded(
        sqlx::query_as::<_, WordRow>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to search words")
}

#[instrument(skip(pool))]
pub(crate) async fn fetch_word(pool: &PgPool, id: Uuid) -> Result<Option<WordRow>> {
    let query = format!("SELECT {WORD_COLUMNS} FROM words WHERE id = $1");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, WordRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to fetch word")
}

#[instrument(skip(pool))]
pub(crate) async fn list_words(pool: &PgPool) -> Result<Vec<WordRow>> {
    let query = format!("SELECT {WORD_COLUMNS} FROM words ORDER BY created_at DESC");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    bounded(sqlx::query_as::<_, WordRow>(&query).fetch_all(pool).instrument(span))
        .await?
        .context("Failed to list words")
}

/// Hydrate ids into words, preserving the order of `ids`. Ids that no
/// longer resolve are skipped rather than erroring the whole page.
#[instrument(skip(pool, ids))]
pub(crate) async fn words_in_order(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<WordResponse>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ANY($1)");

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    let rows = bounded(
        sqlx::query_as::<_, WordRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to hydrate words")?;

    let mut by_id: HashMap<Uuid, WordRow> =
        rows.into_iter().map(|row| (row.id, row)).collect();

    Ok(ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(WordResponse::from)
        .collect())
}

#[instrument(skip(pool, word))]
pub(crate) async fn insert_word(pool: &PgPool, word: &WordRequest) -> Result<WordRow> {
    let query = format!(
        "INSERT INTO words (id, sub_term, japanese, myanmar, english, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {WORD_COLUMNS}"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, WordRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&word.sub_term)
            .bind(&word.japanese)
            .bind(&word.myanmar)
            .bind(&word.english)
            .bind(&word.image_url)
            .fetch_one(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to insert word")
}

/// None when the word does not exist.
#[instrument(skip(pool, word))]
pub(crate) async fn update_word(
    pool: &PgPool,
    id: Uuid,
    word: &WordRequest,
) -> Result<Option<WordRow>> {
    let query = format!(
        "UPDATE words SET sub_term = $2, japanese = $3, myanmar = $4, english = $5, \
         image_url = $6, updated_at = NOW() WHERE id = $1 RETURNING {WORD_COLUMNS}"
    );

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = %query
    );

    bounded(
        sqlx::query_as::<_, WordRow>(&query)
            .bind(id)
            .bind(&word.sub_term)
            .bind(&word.japanese)
            .bind(&word.myanmar)
            .bind(&word.english)
            .bind(&word.image_url)
            .fetch_optional(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to update word")
}

#[instrument(skip(pool))]
pub(crate) async fn delete_word(pool: &PgPool, id: Uuid) -> Result<bool> {
    let query = "DELETE FROM words WHERE id = $1";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = %query
    );

    let result = bounded(sqlx::query(query).bind(id).execute(pool).instrument(span))
        .await?
        .context("Failed to delete word")?;

    Ok(result.rows_affected() > 0)
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
