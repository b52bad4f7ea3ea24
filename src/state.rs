use std::sync::Arc;

use bcrypt::BcryptError;

use crate::config::Config;
use crate::data::repositories::UserRepository;
use crate::db::DbPool;

/// Shared handler state: the connection pool and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    /// Hash at the configured cost, checked when a login names an unknown
    /// email so that path costs the same as a wrong password.
    pub dummy_password_hash: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Result<Self, BcryptError> {
        let dummy_password_hash =
            UserRepository::hash_password("wrong-note-dummy-password", config.bcrypt_cost)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            dummy_password_hash: dummy_password_hash.into(),
        })
    }
}
