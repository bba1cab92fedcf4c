//! CryptoCompare daily history service
//!
//! Serves pages of daily OHLC bars from the `data/v2/histoday` endpoint.

use crate::config::{DataSourceConfig, HttpEnvConfig};
use crate::domain::errors::FetchError;
use crate::domain::market::DailyBar;
use crate::domain::ports::HistoricalDataSource;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, warn};

pub struct CryptoCompareHistoryService {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
    quote_currency: String,
}

impl CryptoCompareHistoryService {
    pub fn new(client: ClientWithMiddleware, config: &DataSourceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            quote_currency: config.quote_currency.clone(),
        }
    }

    pub fn from_config(
        data_source: &DataSourceConfig,
        http: &HttpEnvConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = HttpClientFactory::create_client(http)?;
        Ok(Self::new(client, data_source))
    }

    pub fn histoday_url(&self, asset: &str, to_ts: i64, limit: usize) -> String {
        let url = format!("{}/data/v2/histoday", self.base_url);
        let asset = asset.to_uppercase();
        let to_ts = to_ts.to_string();
        let limit = limit.to_string();
        build_url_with_query(
            &url,
            &[
                ("fsym", asset.as_str()),
                ("tsym", self.quote_currency.as_str()),
                ("toTs", to_ts.as_str()),
                ("limit", limit.as_str()),
            ],
        )
    }
}

/// Envelope of a histoday response. Missing `Data` levels decode as an empty page.
#[derive(Debug, Default, Deserialize)]
pub struct HistodayResponse {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "Data", default)]
    pub data: HistodayData,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistodayData {
    #[serde(rename = "Data", default)]
    pub data: Vec<DailyBar>,
}

impl HistodayResponse {
    pub fn into_bars(self) -> Vec<DailyBar> {
        self.data.data
    }

    fn is_error(&self) -> bool {
        self.response.as_deref().is_some_and(|r| r != "Success")
    }
}

#[async_trait]
impl HistoricalDataSource for CryptoCompareHistoryService {
    async fn fetch_daily_page(
        &self,
        asset: &str,
        to_ts: i64,
        limit: usize,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let url = self.histoday_url(asset, to_ts, limit);
        debug!("CryptoCompareHistoryService: GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("authorization", format!("Apikey {}", key));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let payload: HistodayResponse = response.json().await?;
        if payload.is_error() {
            warn!(
                "CryptoCompareHistoryService: {} responded with '{}'",
                asset,
                payload.message.as_deref().unwrap_or("no message")
            );
        }

        Ok(payload.into_bars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CryptoCompareHistoryService {
        CryptoCompareHistoryService::from_config(
            &DataSourceConfig {
                base_url: "https://min-api.cryptocompare.com/".to_string(),
                ..DataSourceConfig::default()
            },
            &HttpEnvConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_histoday_url() {
        let url = service().histoday_url("btc", 1_704_067_200, 2000);
        assert_eq!(
            url,
            "https://min-api.cryptocompare.com/data/v2/histoday?fsym=BTC&tsym=USD&toTs=1704067200&limit=2000"
        );
    }

    #[test]
    fn test_decode_histoday_payload() {
        let raw = r#"{
            "Response": "Success",
            "Message": "",
            "Data": {
                "Aggregated": false,
                "TimeFrom": 1704067200,
                "TimeTo": 1704153600,
                "Data": [
                    {"time": 1704067200, "high": 44200.1, "low": 42100.5, "open": 42280.0,
                     "volumefrom": 1.0, "volumeto": 2.0, "close": 44180.2,
                     "conversionType": "direct", "conversionSymbol": ""},
                    {"time": 1704153600, "high": 45900.0, "low": 44150.0, "open": 44180.2,
                     "volumefrom": 1.0, "volumeto": 2.0, "close": 44950.0,
                     "conversionType": "direct", "conversionSymbol": ""}
                ]
            }
        }"#;

        let payload: HistodayResponse = serde_json::from_str(raw).unwrap();
        assert!(!payload.is_error());
        let bars = payload.into_bars();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].time, 1_704_067_200);
        assert_eq!(bars[1].close, 44950.0);
    }

    #[test]
    fn test_error_payload_decodes_as_empty_page() {
        let raw = r#"{"Response": "Error", "Message": "rate limit", "Data": {}}"#;

        let payload: HistodayResponse = serde_json::from_str(raw).unwrap();
        assert!(payload.is_error());
        assert!(payload.into_bars().is_empty());
    }
}
