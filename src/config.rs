use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::locale::Locale;

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Minimum wrong-attempt count for a question to appear in the review list.
    pub review_threshold: u32,
    pub locale: Locale,
    pub bcrypt_cost: u32,
    pub question_bank_path: Option<PathBuf>,
    pub session_secure: bool,
}

#[derive(Error, Debug)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            database_url: try_load("DATABASE_URL", "wrong_note.db")?,
            bind_addr: try_load("BIND_ADDR", "127.0.0.1:5000")?,
            review_threshold: try_load("REVIEW_THRESHOLD", "3")?,
            locale: try_load("LOCALE", "ko")?,
            bcrypt_cost: try_load("BCRYPT_COST", "12")?,
            question_bank_path: env::var("QUESTION_BANK_PATH").ok().map(PathBuf::from),
            session_secure: try_load("SESSION_SECURE", "false")?,
        };

        if config.review_threshold == 0 {
            return Err(ConfigError {
                key: "REVIEW_THRESHOLD",
                value: "0".into(),
                reason: "threshold must be at least 1".into(),
            });
        }

        Ok(config)
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        log::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}
