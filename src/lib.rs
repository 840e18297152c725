//! # Jiten (Language Dictionary API)
//!
//! `jiten` is the backend for a language-learning dictionary: a searchable
//! word corpus (Japanese / Myanmar / English), user accounts with per-user
//! favorites, and a subscription pricing configuration.
//!
//! ## Accounts & Tokens
//!
//! Accounts carry a role (`user` or `admin`) and an embedded subscription
//! snapshot. Authentication is stateless: login issues a signed, expiring
//! JWT and validation never touches the database. There is no server-side
//! revocation list, so a leaked token stays valid until its natural expiry.
//!
//! ## Favorites
//!
//! Favorites are a per-account set of word references. Add and remove are
//! idempotent at the store boundary, and the paginated listing slices the
//! set in insertion order before hydrating references into full word rows.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
