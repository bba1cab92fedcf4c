use crate::domain::errors::FetchError;
use crate::domain::market::DailyBar;
use crate::domain::market::date_range::{SECONDS_PER_DAY, day_timestamp};
use crate::domain::ports::HistoricalDataSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// In-memory history source with the same paging contract as the HTTP API.
///
/// Each page holds the newest `limit` bars at or before `to_ts`, ascending.
pub struct MockHistorySource {
    bars: Vec<DailyBar>,
    fail_on_call: Option<(usize, u16)>,
    exhausted_after: Option<usize>,
    frozen: bool,
    calls: AtomicUsize,
}

impl MockHistorySource {
    pub fn new(mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|bar| bar.time);
        Self {
            bars,
            fail_on_call: None,
            exhausted_after: None,
            frozen: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// `days` consecutive daily bars from `start` with a deterministic oscillating price.
    pub fn synthetic(start: NaiveDate, days: usize) -> Self {
        let origin = day_timestamp(start);
        let bars = (0..days)
            .map(|i| {
                let base = 100.0 + 10.0 * ((i as f64) * 0.7).sin() + (i % 5) as f64;
                DailyBar {
                    time: origin + i as i64 * SECONDS_PER_DAY,
                    open: base,
                    high: base + 2.0 + (i % 3) as f64,
                    low: base - 1.5 - (i % 4) as f64 * 0.5,
                    close: base + 0.5,
                }
            })
            .collect();
        Self::new(bars)
    }

    /// Fail the `call`-th request (1-based) with HTTP `status`.
    pub fn failing_on_call(mut self, call: usize, status: u16) -> Self {
        self.fail_on_call = Some((call, status));
        self
    }

    /// Return empty pages once `pages` pages have been served.
    pub fn exhausted_after(mut self, pages: usize) -> Self {
        self.exhausted_after = Some(pages);
        self
    }

    /// Ignore the cursor and always serve the newest page.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoricalDataSource for MockHistorySource {
    async fn fetch_daily_page(
        &self,
        asset: &str,
        to_ts: i64,
        limit: usize,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("MockHistorySource: call {} for {} to {}", call, asset, to_ts);

        if let Some((fail_call, status)) = self.fail_on_call
            && fail_call == call
        {
            return Err(FetchError::Transport {
                status,
                body: "simulated failure".to_string(),
            });
        }

        if self.exhausted_after.is_some_and(|pages| call > pages) {
            return Ok(Vec::new());
        }

        let end = if self.frozen {
            self.bars.len()
        } else {
            self.bars.partition_point(|bar| bar.time <= to_ts)
        };
        let begin = end.saturating_sub(limit);

        Ok(self.bars[begin..end].to_vec())
    }
}
