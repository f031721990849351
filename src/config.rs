use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub proxy_port: u16,
    pub api_base_url: String,
    pub data_path: Option<PathBuf>,
    pub store_retry: RetryPolicy,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Bounded exponential backoff for opening the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero-based), doubling each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let attempts: u32 = try_load(&lookup, "STORE_CONNECT_RETRIES", "5")?;
        let backoff_ms: u64 = try_load(&lookup, "STORE_CONNECT_BACKOFF_MS", "100")?;

        Ok(Self {
            port: try_load(&lookup, "PORT", "5000")?,
            proxy_port: try_load(&lookup, "PROXY_PORT", "3000")?,
            api_base_url: try_load(&lookup, "API_BASE_URL", "http://localhost:5000/api")?,
            data_path: lookup("DATA_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
            store_retry: RetryPolicy {
                attempts: attempts.max(1),
                initial_backoff: Duration::from_millis(backoff_ms),
            },
            cors_origins: try_load::<String>(&lookup, "CORS_ORIGINS", "http://localhost:3000")?
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            environment: try_load(&lookup, "APP_ENV", "development")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
