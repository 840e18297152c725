//! Subscription pricing configuration. Reading is public so clients can
//! render the paywall before login; writing requires a token.

pub(crate) mod storage;
pub mod types;

use self::types::{PricingRequest, PricingResponse};
use crate::api::handlers::auth::{require_auth, AuthConfig};
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/subscriptions/prices",
    tag = "subscriptions",
    responses(
        (status = 200, description = "Current pricing entries", body = [PricingResponse])
    )
)]
pub async fn prices(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::fetch_prices(&pool).await {
        Ok(rows) => {
            let prices: Vec<PricingResponse> =
                rows.into_iter().map(PricingResponse::from).collect();
            (StatusCode::OK, Json(prices)).into_response()
        }
        Err(err) => {
            error!("Failed to fetch prices: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/subscriptions/prices",
    tag = "subscriptions",
    security(("bearer_token" = [])),
    request_body = PricingRequest,
    responses(
        (status = 200, description = "Pricing updated", body = PricingResponse),
        (status = 400, description = "Invalid pricing values"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update_prices(
    headers: HeaderMap,
    auth: Extension<Arc<AuthConfig>>,
    pool: Extension<PgPool>,
    payload: Option<Json<PricingRequest>>,
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

    match storage::upsert_prices(&pool, &request).await {
        Ok(row) => (StatusCode::OK, Json(PricingResponse::from(row))).into_response(),
        Err(err) => {
            error!("Failed to upsert prices: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
