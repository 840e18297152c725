//! Registration, login and the stateless token machinery behind them.

pub mod login;
pub mod password;
pub mod principal;
pub mod register;
pub(crate) mod state;
pub(crate) mod storage;
pub mod token;
pub mod types;

pub use principal::{require_auth, Principal};
pub use state::AuthConfig;
