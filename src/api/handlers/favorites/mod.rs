//! Per-account favorite words: a set of references into the word corpus.

mod pagination;
pub(crate) mod storage;
pub mod types;

use self::pagination::page_window;
use self::storage::AddOutcome;
use self::types::{FavoriteRequest, PageQuery, PaginatedFavorites};
use crate::api::handlers::{
    auth::{require_auth, AuthConfig},
    words::{self, types::WordResponse},
    MessageResponse,
};
use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// All favorites for the caller, hydrated into full word rows.
#[utoipa::path(
    get,
    path = "/api/users/favorites",
    tag = "favorites",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Favorite words", body = [WordResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_favorites(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let ids = match storage::favorite_ids(&pool, principal.user_id).await {
        Ok(ids) => ids,
        Err(err) => {
            error!("Failed to list favorites: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match words::storage::words_in_order(&pool, &ids).await {
        Ok(favorites) => (StatusCode::OK, Json(favorites)).into_response(),
        Err(err) => {
            error!("Failed to hydrate favorites: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Add a word to the caller's favorites. Adding twice is a success.
#[utoipa::path(
    post,
    path = "/api/users/favorites/add",
    tag = "favorites",
    security(("bearer_token" = [])),
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite saved", body = MessageResponse),
        (status = 400, description = "Malformed word id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Word or account does not exist")
    )
)]
pub async fn add(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<FavoriteRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(word_id) = parse_word_id(payload) else {
        return (StatusCode::BAD_REQUEST, "Invalid word ID format").into_response();
    };

    match storage::add_favorite(&pool, principal.user_id, word_id).await {
        Ok(AddOutcome::Saved) => (
            StatusCode::OK,
            Json(MessageResponse::new("Word added to favorites")),
        )
            .into_response(),
        Ok(AddOutcome::MissingWord) => (StatusCode::NOT_FOUND, "Word not found").into_response(),
        Ok(AddOutcome::MissingUser) => (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(err) => {
            error!("Failed to add favorite: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Remove a word from the caller's favorites. Absent entries are a no-op.
#[utoipa::path(
    delete,
    path = "/api/users/favorites/remove",
    tag = "favorites",
    security(("bearer_token" = [])),
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite removed", body = MessageResponse),
        (status = 400, description = "Malformed word id"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn remove(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<FavoriteRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(word_id) = parse_word_id(payload) else {
        return (StatusCode::BAD_REQUEST, "Invalid word ID format").into_response();
    };

    match storage::remove_favorite(&pool, principal.user_id, word_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new("Word removed from favorites")),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to remove favorite: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// One page of favorites, hydrated into full word rows.
#[utoipa::path(
    get,
    path = "/api/users/favorites/paginated",
    tag = "favorites",
    params(PageQuery),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "One page of favorite words", body = PaginatedFavorites),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn paginated(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    query: Query<PageQuery>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let total = match storage::count_favorites(&pool, principal.user_id).await {
        Ok(total) => total,
        Err(err) => {
            error!("Failed to count favorites: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let window = page_window(
        total,
        query.page.unwrap_or_default(),
        query.limit.unwrap_or_default(),
    );

    let ids = if window.len == 0 {
        Vec::new()
    } else {
        match storage::favorite_ids_window(&pool, principal.user_id, window.offset, window.len)
            .await
        {
            Ok(ids) => ids,
            Err(err) => {
                error!("Failed to page favorites: {:?}", err);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    };

    let favorites = match words::storage::words_in_order(&pool, &ids).await {
        Ok(words) => words,
        Err(err) => {
            error!("Failed to hydrate favorites: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        StatusCode::OK,
        Json(PaginatedFavorites {
            favorites,
            page: window.page,
            has_more: window.has_more,
        }),
    )
        .into_response()
}

fn parse_word_id(payload: Option<Json<FavoriteRequest>>) -> Option<Uuid> {
    let Json(request) = payload?;
    Uuid::parse_str(&request.word_id).ok()
}
