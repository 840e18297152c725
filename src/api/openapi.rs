use super::handlers::{auth, favorites, health, subscriptions, users, words};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register::register,
        auth::login::login,
        users::profile,
        users::change_password,
        users::delete_me,
        users::subscribed,
        favorites::list_favorites,
        favorites::add,
        favorites::remove,
        favorites::paginated,
        words::search,
        words::get_word,
        words::list_words,
        words::create,
        words::update,
        words::delete_word,
        subscriptions::prices,
        subscriptions::update_prices,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Account self-service and subscriber listing"),
        (name = "favorites", description = "Per-account favorite words"),
        (name = "words", description = "Dictionary corpus"),
        (name = "subscriptions", description = "Subscription pricing"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
