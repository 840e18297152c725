use crate::{api, api::handlers::auth::AuthConfig, cli::actions::Action};
use anyhow::Result;
use url::Url;

/// Execute the server action.
///
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
        } => {
            // Fail early on a malformed DSN instead of at pool connect time
            let dsn = Url::parse(&dsn)?;

            let auth_config = AuthConfig::new(jwt_secret)
                .with_token_ttl_hours(token_ttl_hours)
                .with_bcrypt_cost(bcrypt_cost);

            api::new(port, dsn.as_str(), auth_config).await?;
        }
    }

    Ok(())
}
