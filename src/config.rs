use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::customer_groups::{RetryPolicy, service::MAX_RETRY_DELAY};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub max_batch_size: usize,
    pub retry: RetryPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any key/value source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt_secret = required(&lookup, "JWT_SECRET")?;

        let bind_addr =
            parsed(&lookup, "BIND_ADDR")?.unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));

        let defaults = RetryPolicy::default();
        let max_attempts =
            parsed(&lookup, "MEMBERSHIP_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts);
        let base_delay = match parsed::<_, u64>(&lookup, "MEMBERSHIP_RETRY_DELAY_MS")? {
            Some(ms) if Duration::from_millis(ms) > MAX_RETRY_DELAY => {
                return Err(ConfigError::Invalid {
                    name: "MEMBERSHIP_RETRY_DELAY_MS",
                    value: ms.to_string(),
                });
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.base_delay,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            max_batch_size: parsed(&lookup, "MAX_BATCH_SIZE")?.unwrap_or(DEFAULT_MAX_BATCH_SIZE),
            retry: RetryPolicy {
                max_attempts: max_attempts.max(1),
                base_delay,
            },
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}
