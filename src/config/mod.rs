//! Configuration module for Pricetrail.
//!
//! Structured configuration loaded from environment variables, split into
//! the upstream data source and the HTTP transport.

mod data_source_config;
mod http_config;

pub use data_source_config::DataSourceConfig;
pub use http_config::HttpEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_source: DataSourceConfig,
    pub http: HttpEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let data_source =
            DataSourceConfig::from_env().context("Failed to load data source config")?;
        let http = HttpEnvConfig::from_env().context("Failed to load HTTP config")?;

        Ok(Self { data_source, http })
    }
}

/// Reads `key`, falling back to `default` when unset. Unparseable values are errors.
pub(crate) fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + ToString,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<T>()
        .context(format!("Failed to parse {}", key))
}
