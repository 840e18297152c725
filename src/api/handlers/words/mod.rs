//! The word corpus: public lookup and search, token-gated editing.

pub(crate) mod storage;
pub mod types;

use self::types::{SearchQuery, WordRequest, WordResponse};
use crate::api::handlers::{
    auth::{require_auth, AuthConfig},
    MessageResponse,
};
use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Substring search across all term fields. Public, no token required.
#[utoipa::path(
    get,
    path = "/api/words/search",
    tag = "words",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching words", body = [WordResponse]),
        (status = 400, description = "Empty search term")
    )
)]
pub async fn search(pool: Extension<PgPool>, query: Query<SearchQuery>) -> impl IntoResponse {
    if query.query.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Search query is required").into_response();
    }

    match storage::search_words(&pool, query.query.trim()).await {
        Ok(rows) => {
            let words: Vec<WordResponse> = rows.into_iter().map(WordResponse::from).collect();
            (StatusCode::OK, Json(words)).into_response()
        }
        Err(err) => {
            error!("Failed to search words: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Fetch one word by id. Public, no token required.
#[utoipa::path(
    get,
    path = "/api/words/{id}",
    tag = "words",
    params(("id" = Uuid, Path, description = "Word id")),
    responses(
        (status = 200, description = "The word", body = WordResponse),
        (status = 404, description = "No such word")
    )
)]
pub async fn get_word(pool: Extension<PgPool>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match storage::fetch_word(&pool, id).await {
        Ok(Some(row)) => (StatusCode::OK, Json(WordResponse::from(row))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Word not found").into_response(),
        Err(err) => {
            error!("Failed to fetch word: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// The whole corpus, newest first.
#[utoipa::path(
    get,
    path = "/api/words",
    tag = "words",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "All words", body = [WordResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_words(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &auth) {
        return status.into_response();
    }

    match storage::list_words(&pool).await {
        Ok(rows) => {
            let words: Vec<WordResponse> = rows.into_iter().map(WordResponse::from).collect();
            (StatusCode::OK, Json(words)).into_response()
        }
        Err(err) => {
            error!("Failed to list words: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/words",
    tag = "words",
    security(("bearer_token" = [])),
    request_body = WordRequest,
    responses(
        (status = 201, description = "Word created", body = WordResponse),
        (status = 400, description = "Missing or blank terms"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<WordRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &auth) {
        return status.into_response();
    }

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing request body").into_response();
    };

    if let Err(message) = request.validate() {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match storage::insert_word(&pool, &request).await {
        Ok(row) => (StatusCode::CREATED, Json(WordResponse::from(row))).into_response(),
        Err(err) => {
            error!("Failed to insert word: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/words/{id}",
    tag = "words",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Word id")),
    request_body = WordRequest,
    responses(
        (status = 200, description = "Word updated", body = WordResponse),
        (status = 400, description = "Missing or blank terms"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such word")
    )
)]
pub async fn update(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    Path(id): Path<Uuid>,
    payload: Option<Json<WordRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &auth) {
        return status.into_response();
    }

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing request body").into_response();
    };

    if let Err(message) = request.validate() {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match storage::update_word(&pool, id, &request).await {
        Ok(Some(row)) => (StatusCode::OK, Json(WordResponse::from(row))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Word not found").into_response(),
        Err(err) => {
            error!("Failed to update word: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/words/{id}",
    tag = "words",
    security(("bearer_token" = [])),
    params(("id" = Uuid, Path, description = "Word id")),
    responses(
        (status = 200, description = "Word deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such word")
    )
)]
pub async fn delete_word(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &auth) {
        return status.into_response();
    }

    match storage::delete_word(&pool, id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Word deleted successfully")),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Word not found").into_response(),
        Err(err) => {
            error!("Failed to delete word: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
