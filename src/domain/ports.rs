use crate::domain::errors::FetchError;
use crate::domain::market::DailyBar;
use async_trait::async_trait;

/// A paged source of daily history: "give me up to `limit` days ending at `to_ts`".
///
/// Pages are returned in ascending time order. An empty page means the source
/// has nothing older (or a quota ceiling was hit).
#[async_trait]
pub trait HistoricalDataSource: Send + Sync {
    async fn fetch_daily_page(
        &self,
        asset: &str,
        to_ts: i64,
        limit: usize,
    ) -> Result<Vec<DailyBar>, FetchError>;
}
