use super::{
    password, token,
    state::AuthConfig,
    types::{LoginRequest, LoginResponse},
};
use crate::api::handlers::users::storage::{self, AccountRow};
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

/// Unknown-email and wrong-password collapse into the same branch so the
/// response (status, message and roughly timing) cannot distinguish them.
fn verify_login(account: Option<AccountRow>, attempted_password: &str) -> Option<AccountRow> {
    let account = account?;

    if password::verify_password(attempted_password, &account.password_hash) {
        Some(account)
    } else {
        None
    }
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing request body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing request body").into_response();
    };

    let account = match storage::fetch_account_by_email(&pool, &request.email).await {
        Ok(account) => account,
        Err(err) => {
            error!("Failed to fetch account: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(account) = verify_login(account, &request.password) else {
        return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
    };

    let (role, subscription) = match (account.role(), account.subscription()) {
        (Ok(role), Ok(subscription)) => (role, subscription),
        (Err(err), _) | (_, Err(err)) => {
            error!("Corrupt account row: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let token = match token::issue(account.id, role, auth.token_ttl(), auth.jwt_secret()) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to sign token: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        StatusCode::OK,
        Json(LoginResponse {
            token,
            role,
            subscription,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    // bcrypt's minimum cost (4), kept local because the crate does not export it
    const MIN_COST: u32 = 4;

    fn account_with_password(plaintext: &str) -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            email: "mami@example.com".into(),
            password_hash: password::hash_password(plaintext, MIN_COST).unwrap(),
            role: "user".into(),
            subscription_status: "inactive".into(),
            subscription_plan_id: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_verify_login_accepts_matching_password() {
        let account = account_with_password("hunter2");
        assert!(verify_login(Some(account), "hunter2").is_some());
    }

    #[test]
    fn test_verify_login_rejects_wrong_password() {
        let account = account_with_password("hunter2");
        assert!(verify_login(Some(account), "hunter3").is_none());
    }

    #[test]
    fn test_verify_login_rejects_unknown_email() {
        assert!(verify_login(None, "hunter2").is_none());
    }
}
