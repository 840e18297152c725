use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

/// Service health, includes a live database ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database healthy"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health(method: Method, pool: Extension<PgPool>) -> impl IntoResponse {
    let database_ok = match pool.acquire().await {
        Ok(mut conn) => match sqlx::query("SELECT 1").execute(&mut *conn).await {
            Ok(_) => true,
            Err(err) => {
                error!("Database ping failed: {}", err);
                false
            }
        },
        Err(err) => {
            error!("Failed to acquire database connection: {}", err);
            false
        }
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let short_hash = crate::GIT_COMMIT_HASH.chars().take(7).collect::<String>();

    let headers = [(
        "X-App",
        format!(
            "{}:{}:{}",
            crate::built_info::PKG_NAME,
            crate::built_info::PKG_VERSION,
            short_hash
        ),
    )];

    // HEAD gets headers only
    if method == Method::HEAD {
        return (status, headers).into_response();
    }

    let body = json!({
        "name": crate::built_info::PKG_NAME,
        "version": crate::built_info::PKG_VERSION,
        "commit": short_hash,
        "database": if database_ok { "ok" } else { "error" },
    });

    (status, headers, Json(body)).into_response()
}
