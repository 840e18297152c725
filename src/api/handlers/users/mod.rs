//! Account self-service plus the admin-facing subscriber listing.

pub(crate) mod storage;
pub mod types;

use self::types::{AccountResponse, ChangePasswordRequest};
use crate::api::handlers::{
    auth::{password, require_auth, AuthConfig},
    favorites, MessageResponse,
};
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

/// The caller's account, including the full favorites id list.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Account profile", body = AccountResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn profile(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let account = match storage::fetch_account(&pool, principal.user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(err) => {
            error!("Failed to load account: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let favorites = match favorites::storage::favorite_ids(&pool, principal.user_id).await {
        Ok(ids) => ids,
        Err(err) => {
            error!("Failed to load favorites: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match account.into_response_with_favorites(Some(favorites)) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            error!("Corrupt account row: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Change the caller's password after re-checking the current one.
#[utoipa::path(
    put,
    path = "/api/users/password",
    tag = "users",
    security(("bearer_token" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Current password incorrect or missing body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn change_password(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<ChangePasswordRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing request body").into_response();
    };

    if request.new_password.is_empty() {
        return (StatusCode::BAD_REQUEST, "New password is required").into_response();
    }

    let account = match storage::fetch_account(&pool, principal.user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(err) => {
            error!("Failed to load account: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if !password::verify_password(&request.current_password, &account.password_hash) {
        return (StatusCode::BAD_REQUEST, "Current password incorrect").into_response();
    }

    let new_hash = match password::hash_password(&request.new_password, auth.bcrypt_cost()) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match storage::update_password(&pool, principal.user_id, &new_hash).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Password updated successfully")),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(err) => {
            error!("Failed to update password: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Delete the caller's account. Favorites go with it via cascade.
#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn delete_me(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match storage::delete_account(&pool, principal.user_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new("Account deleted successfully")),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(err) => {
            error!("Failed to delete account: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// All accounts with an active subscription.
#[utoipa::path(
    get,
    path = "/api/users/subscribed",
    tag = "users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Active subscribers", body = [AccountResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn subscribed(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &auth) {
        return status.into_response();
    }

    let rows = match storage::list_active_subscribers(&pool).await {
        Ok(rows) => rows,
        Err(err) => {
            error!("Failed to list subscribers: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut accounts = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_response_with_favorites(None) {
            Ok(account) => accounts.push(account),
            Err(err) => {
                error!("Corrupt account row: {:?}", err);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }

    (StatusCode::OK, Json(accounts)).into_response()
}
