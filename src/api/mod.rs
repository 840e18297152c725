use crate::api::handlers::{auth, favorites, health, subscriptions, users, words};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Request,
    },
    routing::{delete, get, post, put},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod db;
pub mod handlers;
// OpenAPI document wiring lives in openapi.rs; the router below is the
// single source of truth for which routes are served.
mod openapi;

pub use openapi::openapi;

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: &str, auth_config: auth::AuthConfig) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .acquire_timeout(db::QUERY_DEADLINE)
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;

    // Idempotent schema bootstrap so a fresh database is usable immediately.
    db::bootstrap(&pool)
        .await
        .context("Failed to prepare database schema")?;

    let auth_state = Arc::new(auth_config);

    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods(Any)
        .allow_origin(Any);

    let app = Router::new()
        .route("/api/auth/register", post(auth::register::register))
        .route("/api/auth/login", post(auth::login::login))
        .route("/api/users/password", put(users::change_password))
        .route("/api/users/profile", get(users::profile))
        .route("/api/users/me", delete(users::delete_me))
        .route("/api/users/subscribed", get(users::subscribed))
        .route("/api/users/favorites", get(favorites::list_favorites))
        .route("/api/users/favorites/add", post(favorites::add))
        .route("/api/users/favorites/remove", delete(favorites::remove))
        .route("/api/users/favorites/paginated", get(favorites::paginated))
        .route("/api/words/search", get(words::search))
        .route("/api/words", get(words::list_words).post(words::create))
        .route(
            "/api/words/:id",
            get(words::get_word)
                .put(words::update)
                .delete(words::delete_word),
        )
        .route(
            "/api/subscriptions/prices",
            get(subscriptions::prices).put(subscriptions::update_prices),
        )
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(auth_state))
                .layer(Extension(pool)),
        );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
