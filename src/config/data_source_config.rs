//! Upstream data source configuration parsing from environment variables.

use super::parse_env;
use crate::application::market_data::fetcher::DEFAULT_PAGE_SIZE;
use anyhow::{Result, ensure};
use std::env;

/// CryptoCompare histoday API configuration
#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub quote_currency: String,
    pub page_size: usize,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://min-api.cryptocompare.com".to_string(),
            api_key: None,
            quote_currency: "USD".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DataSourceConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let page_size = parse_env("HISTODAY_PAGE_SIZE", defaults.page_size)?;
        ensure!(page_size > 0, "HISTODAY_PAGE_SIZE must be at least 1");

        Ok(Self {
            base_url: env::var("CRYPTOCOMPARE_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env::var("CRYPTOCOMPARE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            quote_currency: env::var("QUOTE_CURRENCY")
                .map(|q| q.to_uppercase())
                .unwrap_or(defaults.quote_currency),
            page_size,
        })
    }
}
