//! Service configuration read from the environment (and `.env`, if present).

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings.
///
/// - `DATABASE_URL`, `ACCOUNT_SERVICE_URL`, `CATALOG_SERVICE_URL` are required
/// - `HOST` defaults to `0.0.0.0`, `PORT` to `8080`
/// - `LOOKUP_TIMEOUT_SECS` bounds each remote lookup (default 5)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub account_service_url: String,
    pub catalog_service_url: String,
    pub host: String,
    pub port: u16,
    pub lookup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let parsed = |name: &'static str, default: u64| match get(name) {
            None => Ok(default),
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid { name, value }),
        };

        let port = parsed("PORT", 8080)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port.to_string(),
        })?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            account_service_url: required("ACCOUNT_SERVICE_URL")?,
            catalog_service_url: required("CATALOG_SERVICE_URL")?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            lookup_timeout: Duration::from_secs(parsed("LOOKUP_TIMEOUT_SECS", 5)?),
        })
    }
}
