pub mod server;

use secrecy::SecretString;

/// Actions the CLI can dispatch to.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        jwt_secret: SecretString,
        token_ttl_hours: u64,
        bcrypt_cost: u32,
    },
}
