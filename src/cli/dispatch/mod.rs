//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action executed by the binary.

use crate::cli::actions::Action;
use crate::cli::commands::auth;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let jwt_secret = matches
        .get_one::<String>(auth::ARG_JWT_SECRET)
        .cloned()
        .context("missing required argument: --jwt-secret")?;
    let token_ttl_hours = matches
        .get_one::<u64>(auth::ARG_TOKEN_TTL_HOURS)
        .copied()
        .unwrap_or(72);
    let bcrypt_cost = matches
        .get_one::<u32>(auth::ARG_BCRYPT_COST)
        .copied()
        .unwrap_or(12);

    Ok(Action::Server {
        port,
        dsn,
        jwt_secret: SecretString::from(jwt_secret),
        token_ttl_hours,
        bcrypt_cost,
    })
}
