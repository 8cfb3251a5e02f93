//! Environment configuration.

use std::str::FromStr;

use crate::server::{error::config::ConfigError, scheduler::config::DEFAULT_SYNC_CRON};

/// Default address the HTTP listener binds to.
pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
/// Default upper bound, in seconds, for a single provider resource request.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Default number of providers synchronized at the same time.
pub const DEFAULT_MAX_CONCURRENT_SYNCS: usize = 4;

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL.
    pub database_url: String,
    /// Address the HTTP API listens on.
    pub bind_address: String,
    /// Cron expression for the batch provider sync.
    pub sync_cron: String,
    /// Timeout applied to every provider resource request.
    pub fetch_timeout_secs: u64,
    /// Maximum number of providers synchronized concurrently.
    pub max_concurrent_syncs: usize,
    /// User agent sent to provider endpoints.
    pub user_agent: String,
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `DATABASE_URL` is required; every other variable falls back to its default when unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - A numeric variable could not be parsed or is zero
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let fetch_timeout_secs = parse_positive(
            &lookup,
            "PROVIDER_FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?;
        let max_concurrent_syncs =
            parse_positive(&lookup, "MAX_CONCURRENT_SYNCS", DEFAULT_MAX_CONCURRENT_SYNCS)?;

        Ok(Self {
            database_url,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            sync_cron: lookup("SYNC_CRON").unwrap_or_else(|| DEFAULT_SYNC_CRON.to_string()),
            fetch_timeout_secs,
            max_concurrent_syncs,
            user_agent: lookup("USER_AGENT")
                .unwrap_or_else(|| format!("eventhub/{}", env!("CARGO_PKG_VERSION"))),
        })
    }
}

fn parse_positive<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(value)
}
