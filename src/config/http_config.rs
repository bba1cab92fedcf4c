//! HTTP transport configuration parsing from environment variables.

use super::parse_env;
use anyhow::Result;

/// HTTP transport environment configuration
#[derive(Debug, Clone)]
pub struct HttpEnvConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Retries for transient failures; 0 sends each request exactly once.
    pub max_retries: u32,
}

impl Default for HttpEnvConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 0,
        }
    }
}

impl HttpEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            timeout_secs: parse_env("HTTP_TIMEOUT_SECS", defaults.timeout_secs)?,
            connect_timeout_secs: parse_env(
                "HTTP_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            max_retries: parse_env("HTTP_MAX_RETRIES", defaults.max_retries)?,
        })
    }
}
