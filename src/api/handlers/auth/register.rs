use super::{
    password,
    state::AuthConfig,
    storage::{self, SignupOutcome},
    types::RegisterRequest,
};
use crate::api::handlers::{users::types::AccountResponse, valid_email};
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

/// Create an account. New accounts always start as role `user` with an
/// inactive subscription; there is no self-service admin signup. The
/// response is the created account, never the password hash.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid input or email already exists")
    )
)]
pub async fn register(
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing request body").into_response();
    };

    if !valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email address").into_response();
    }

    if request.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Password is required").into_response();
    }

    let password_hash = match password::hash_password(&request.password, auth.bcrypt_cost()) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match storage::insert_account(&pool, &request.email, &password_hash).await {
        // A fresh account has no favorites yet
        Ok(SignupOutcome::Created(row)) => {
            match row.into_response_with_favorites(Some(Vec::new())) {
                Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
                Err(err) => {
                    error!("Corrupt account row: {:?}", err);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
        Ok(SignupOutcome::Conflict) => {
            (StatusCode::BAD_REQUEST, "Email already exists").into_response()
        }
        Err(err) => {
            error!("Failed to insert account: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
