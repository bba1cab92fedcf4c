//! Backward-paginating history fetcher.
//!
//! The upstream API answers "up to N days ending at T", so the fetcher walks a
//! cursor from the end of the range back towards its start, one page at a time.

use crate::domain::errors::FetchError;
use crate::domain::market::date_range::SECONDS_PER_DAY;
use crate::domain::market::{DailyBar, DateRange, OhlcRecord, OhlcSeries};
use crate::domain::ports::HistoricalDataSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 2000;

pub struct HistoryFetcher {
    source: Arc<dyn HistoricalDataSource>,
    page_size: usize,
}

impl HistoryFetcher {
    pub fn new(source: Arc<dyn HistoricalDataSource>) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Assembles the daily series for `asset` covering `range`.
    ///
    /// Pages are requested sequentially. An empty page ends the walk and keeps
    /// what was gathered so far; any request failure aborts with an error.
    pub async fn fetch(&self, asset: &str, range: DateRange) -> Result<OhlcSeries, FetchError> {
        let start_ts = range.start_timestamp();
        let mut cursor = range.end_timestamp();
        let mut collected: Vec<DailyBar> = Vec::new();
        let mut pages = 0usize;

        while cursor >= start_ts {
            debug!(
                "HistoryFetcher: Requesting {} days of {} ending at {}",
                self.page_size, asset, cursor
            );
            let page = self
                .source
                .fetch_daily_page(asset, cursor, self.page_size)
                .await?;
            pages += 1;

            let Some(earliest) = page.iter().map(|bar| bar.time).min() else {
                warn!(
                    "HistoryFetcher: No data returned for {} ending at {}; either limit exceeded or data unavailable",
                    asset, cursor
                );
                break;
            };

            collected.extend(page.iter().filter(|bar| bar.time >= start_ts).copied());

            // Step from the unfiltered page so fully-filtered pages still advance.
            let next = earliest - SECONDS_PER_DAY;
            if next >= cursor {
                return Err(FetchError::NonProgressingCursor {
                    previous: cursor,
                    next,
                });
            }
            cursor = next;
        }

        if collected.is_empty() {
            info!("HistoryFetcher: No bars for {} in {}", asset, range);
            return Ok(OhlcSeries::empty());
        }

        let records: Vec<OhlcRecord> = collected
            .iter()
            .filter_map(OhlcRecord::from_bar)
            .filter(|record| range.contains(record.date))
            .collect();
        let series = OhlcSeries::from_records(records);

        info!(
            "HistoryFetcher: Fetched {} daily bars for {} in {} ({} pages)",
            series.len(),
            asset,
            range,
            pages
        );

        Ok(series)
    }
}
