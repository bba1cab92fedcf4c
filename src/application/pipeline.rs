//! Fetch-then-compute pipeline for a single asset and date range.

use crate::application::market_data::{HistoryFetcher, MetricTable, MetricsEngine};
use crate::domain::errors::FetchError;
use crate::domain::market::{DateRange, OhlcSeries};
use tracing::{error, info};

/// Outcome of one pipeline run.
///
/// A failed fetch still produces a (empty) table; the failure is carried alongside.
#[derive(Debug)]
pub struct PipelineReport {
    pub table: MetricTable,
    pub fetch_error: Option<FetchError>,
}

impl PipelineReport {
    pub fn is_complete(&self) -> bool {
        self.fetch_error.is_none()
    }
}

pub struct MetricsPipeline {
    fetcher: HistoryFetcher,
    engine: MetricsEngine,
}

impl MetricsPipeline {
    pub fn new(fetcher: HistoryFetcher, engine: MetricsEngine) -> Self {
        Self { fetcher, engine }
    }

    pub async fn run(&self, asset: &str, range: DateRange) -> PipelineReport {
        let (series, fetch_error) = match self.fetcher.fetch(asset, range).await {
            Ok(series) => (series, None),
            Err(e) => {
                error!("Unable to fetch {} history for {}: {}", asset, range, e);
                (OhlcSeries::empty(), Some(e))
            }
        };

        let table = self.engine.compute(&series);
        let params = table.params();
        info!(
            "Computed metrics for {} rows (trailing {}d, forward {}d)",
            table.len(),
            params.trailing(),
            params.forward()
        );

        PipelineReport { table, fetch_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::market_data::WindowParams;
    use crate::infrastructure::mock::MockHistorySource;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn pipeline(source: MockHistorySource) -> MetricsPipeline {
        MetricsPipeline::new(
            HistoryFetcher::new(Arc::new(source)).with_page_size(7),
            MetricsEngine::new(WindowParams::new(7, 5).unwrap()),
        )
    }

    #[test]
    fn test_failed_fetch_yields_empty_table() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let source = MockHistorySource::synthetic(start, 30).failing_on_call(1, 503);
        let range = DateRange::new(start, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()).unwrap();

        let report = tokio_test::block_on(pipeline(source).run("ETH", range));

        assert!(!report.is_complete());
        assert!(report.table.is_empty());
        assert_eq!(report.table.column_names().len(), 15);
        assert_eq!(report.fetch_error.and_then(|e| e.status()), Some(503));
    }

    #[test]
    fn test_successful_run() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let source = MockHistorySource::synthetic(start, 30);
        let range = DateRange::new(start, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()).unwrap();

        let report = tokio_test::block_on(pipeline(source).run("ETH", range));

        assert!(report.is_complete());
        assert_eq!(report.table.len(), 30);
    }
}
