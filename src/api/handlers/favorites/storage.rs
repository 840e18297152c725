use crate::api::{db::bounded, handlers::foreign_key_violation};
use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::{Instrument, instrument};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    /// Inserted, or already present. Adding twice is not an error.
    Saved,
    MissingWord,
    MissingUser,
}

/// Idempotent insert: the composite primary key plus ON CONFLICT keeps
/// the set semantics without a read-then-write.
#[instrument(skip(pool))]
pub(crate) async fn add_favorite(pool: &PgPool, user_id: Uuid, word_id: Uuid) -> Result<AddOutcome> {
    let query = "INSERT INTO user_favorites (user_id, word_id) VALUES ($1, $2) \
         ON CONFLICT (user_id, word_id) DO NOTHING";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = %query
    );

    let inserted = bounded(
        sqlx::query(query)
            .bind(user_id)
            .bind(word_id)
            .execute(pool)
            .instrument(span),
    )
    .await?;

    match inserted {
        Ok(_) => Ok(AddOutcome::Saved),
        Err(err) => match foreign_key_violation(&err).as_deref() {
            Some("user_favorites_word_fk") => Ok(AddOutcome::MissingWord),
            Some("user_favorites_user_fk") => Ok(AddOutcome::MissingUser),
            _ => Err(err).context("Failed to add favorite"),
        },
    }
}

/// Removing an absent favorite is a no-op, mirroring the add side.
#[instrument(skip(pool))]
pub(crate) async fn remove_favorite(pool: &PgPool, user_id: Uuid, word_id: Uuid) -> Result<()> {
    let query = "DELETE FROM user_favorites WHERE user_id = $1 AND word_id = $2";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = %query
    );

    bounded(
        sqlx::query(query)
            .bind(user_id)
            .bind(word_id)
            .execute(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to remove favorite")?;

    Ok(())
}

/// All favorite word ids for an account, in insertion order.
#[instrument(skip(pool))]
pub(crate) async fn favorite_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>> {
    let query = "SELECT word_id FROM user_favorites WHERE user_id = $1 \
         ORDER BY created_at, word_id";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    let rows = bounded(sqlx::query(query).bind(user_id).fetch_all(pool).instrument(span))
        .await?
        .context("Failed to list favorites")?;

    rows.iter()
        .map(|row| row.try_get("word_id").context("Missing word_id column"))
        .collect()
}

#[instrument(skip(pool))]
pub(crate) async fn count_favorites(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let query = "SELECT COUNT(*) FROM user_favorites WHERE user_id = $1";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    let row = bounded(sqlx::query(query).bind(user_id).fetch_one(pool).instrument(span))
        .await?
        .context("Failed to count favorites")?;

    row.try_get(0).context("Missing count column")
}

/// One window of favorite ids, insertion order, for pagination.
#[instrument(skip(pool))]
pub(crate) async fn favorite_ids_window(
    pool: &PgPool,
    user_id: Uuid,
    offset: i64,
    limit: i64,
) -> Result<Vec<Uuid>> {
    let query = "SELECT word_id FROM user_favorites WHERE user_id = $1 \
         ORDER BY created_at, word_id OFFSET $2 LIMIT $3";

    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = %query
    );

    let rows = bounded(
        sqlx::query(query)
            .bind(user_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .instrument(span),
    )
    .await?
    .context("Failed to page favorites")?;

    rows.iter()
        .map(|row| row.try_get("word_id").context("Missing word_id column"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        db::bootstrap,
        handlers::{
            auth::{
                password::{hash_password, verify_password},
                storage::{insert_account, SignupOutcome},
            },
            favorites::pagination::page_window,
            users::storage::fetch_account_by_email,
            words::{storage as words, types::WordRequest},
        },
    };

    async fn seeded_account(pool: &PgPool, email: &str) -> Result<Uuid> {
        match insert_account(pool, email, "hash").await? {
            SignupOutcome::Created(row) => Ok(row.id),
            SignupOutcome::Conflict => anyhow::bail!("account already present"),
        }
    }

    fn word(term: &str) -> WordRequest {
        WordRequest {
            sub_term: term.to_string(),
            japanese: term.to_string(),
            myanmar: term.to_string(),
            english: term.to_string(),
            image_url: None,
        }
    }

    #[sqlx::test]
    async fn test_add_twice_keeps_one_row(pool: PgPool) -> Result<()> {
        bootstrap(&pool).await?;
        let user_id = seeded_account(&pool, "reader@example.com").await?;
        let word_id = words::insert_word(&pool, &word("猫")).await?.id;

        assert_eq!(add_favorite(&pool, user_id, word_id).await?, AddOutcome::Saved);
        assert_eq!(add_favorite(&pool, user_id, word_id).await?, AddOutcome::Saved);
        assert_eq!(count_favorites(&pool, user_id).await?, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_remove_absent_is_noop(pool: PgPool) -> Result<()> {
        bootstrap(&pool).await?;
        let user_id = seeded_account(&pool, "reader@example.com").await?;
        let word_id = words::insert_word(&pool, &word("犬")).await?.id;

        remove_favorite(&pool, user_id, word_id).await?;
        assert_eq!(count_favorites(&pool, user_id).await?, 0);

        // also a no-op once the pair actually exists and is removed twice
        assert_eq!(add_favorite(&pool, user_id, word_id).await?, AddOutcome::Saved);
        remove_favorite(&pool, user_id, word_id).await?;
        remove_favorite(&pool, user_id, word_id).await?;
        assert_eq!(count_favorites(&pool, user_id).await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_add_unknown_word(pool: PgPool) -> Result<()> {
        bootstrap(&pool).await?;
        let user_id = seeded_account(&pool, "reader@example.com").await?;

        let outcome = add_favorite(&pool, user_id, Uuid::new_v4()).await?;
        assert_eq!(outcome, AddOutcome::MissingWord);
        assert_eq!(
            add_favorite(&pool, Uuid::new_v4(), Uuid::new_v4()).await?,
            AddOutcome::MissingUser
        );
        Ok(())
    }

    #[sqlx::test]
    async fn test_signup_login_favorite_page_flow(pool: PgPool) -> Result<()> {
        bootstrap(&pool).await?;

        // bcrypt's minimum cost (4); the crate does not export MIN_COST
        let hash = hash_password("correct horse", 4)?;
        let user_id = match insert_account(&pool, "flow@example.com", &hash).await? {
            SignupOutcome::Created(row) => row.id,
            SignupOutcome::Conflict => anyhow::bail!("account already present"),
        };

        let account = fetch_account_by_email(&pool, "flow@example.com")
            .await?
            .context("account should exist")?;
        assert!(verify_password("correct horse", &account.password_hash));

        let mut seeded = Vec::new();
        for term in ["一", "二", "三"] {
            let id = words::insert_word(&pool, &word(term)).await?.id;
            assert_eq!(add_favorite(&pool, user_id, id).await?, AddOutcome::Saved);
            seeded.push(id);
        }
        assert_eq!(count_favorites(&pool, user_id).await?, 3);

        let window = page_window(3, 1, 2);
        assert!(window.has_more);
        let page = favorite_ids_window(&pool, user_id, window.offset, window.len).await?;
        assert_eq!(page.len(), 2);

        let rest = page_window(3, 2, 2);
        assert!(!rest.has_more);
        let tail = favorite_ids_window(&pool, user_id, rest.offset, rest.len).await?;
        assert_eq!(tail.len(), 1);

        // the two windows cover every seeded word exactly once
        let mut seen: Vec<Uuid> = page.iter().chain(tail.iter()).copied().collect();
        seen.sort();
        let mut expected = seeded.clone();
        expected.sort();
        assert_eq!(seen, expected);

        // hydration preserves the window order
        let hydrated = words::words_in_order(&pool, &page).await?;
        assert_eq!(hydrated.len(), 2);
        assert!(page.iter().zip(&hydrated).all(|(id, w)| *id == w.id));
        Ok(())
    }
}
