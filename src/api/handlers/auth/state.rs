use chrono::Duration;
use secrecy::SecretString;

pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 72;

/// Signing and hashing parameters shared by every auth handler.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    jwt_secret: SecretString,
    token_ttl_hours: u64,
    bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: SecretString) -> Self {
        Self {
            jwt_secret,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    #[must_use]
    pub fn with_token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub const fn jwt_secret(&self) -> &SecretString {
        &self.jwt_secret
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(i64::try_from(self.token_ttl_hours).unwrap_or(72))
    }

    pub const fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(SecretString::from("s3cret"));
        assert_eq!(config.token_ttl(), Duration::hours(72));
        assert_eq!(config.bcrypt_cost(), bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AuthConfig::new(SecretString::from("s3cret"))
            .with_token_ttl_hours(1)
            .with_bcrypt_cost(4);
        assert_eq!(config.token_ttl(), Duration::hours(1));
        assert_eq!(config.bcrypt_cost(), 4);
    }
}
