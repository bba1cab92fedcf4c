//! Rolling-window analytics over a daily OHLC series.
//!
//! For each row the engine derives:
//! - the trailing high/low over the last `trailing` days (today included),
//!   how many rows ago it occurred and the close's % distance from it
//! - the forward high/low over the next `forward` days (today excluded)
//!   and the close's % distance from it

use super::rolling_extremum::{Extremum, forward_extremes, trailing_extremes};
use crate::domain::errors::MetricsError;
use crate::domain::market::{OhlcRecord, OhlcSeries};
use serde::{Deserialize, Serialize};

/// Window sizes, in days, that parameterize a metric table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    trailing: usize,
    forward: usize,
}

impl WindowParams {
    pub fn new(trailing: usize, forward: usize) -> Result<Self, MetricsError> {
        if trailing == 0 {
            return Err(MetricsError::ZeroWindow { window: "trailing" });
        }
        if forward == 0 {
            return Err(MetricsError::ZeroWindow { window: "forward" });
        }
        Ok(Self { trailing, forward })
    }

    pub fn trailing(&self) -> usize {
        self.trailing
    }

    pub fn forward(&self) -> usize {
        self.forward
    }
}

/// Look-back statistics for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailingStats {
    pub high: f64,
    /// Rows between the trailing high and today; 0 when today sets it.
    pub days_since_high: usize,
    pub pct_from_high: Option<f64>,
    pub low: f64,
    pub days_since_low: usize,
    pub pct_from_low: Option<f64>,
}

/// Look-ahead statistics for one row. Missing on the last row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForwardStats {
    pub high: Option<f64>,
    pub pct_from_high: Option<f64>,
    pub low: Option<f64>,
    pub pct_from_low: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRow {
    pub record: OhlcRecord,
    pub trailing: TrailingStats,
    pub forward: ForwardStats,
}

impl MetricRow {
    /// Renders the row in `MetricTable::column_names` order; `None` is a missing value.
    pub fn cells(&self) -> Vec<Option<String>> {
        let r = &self.record;
        let t = &self.trailing;
        let f = &self.forward;
        vec![
            Some(r.date.format("%Y-%m-%d").to_string()),
            Some(r.open.to_string()),
            Some(r.high.to_string()),
            Some(r.low.to_string()),
            Some(r.close.to_string()),
            Some(t.high.to_string()),
            Some(t.days_since_high.to_string()),
            t.pct_from_high.map(|v| v.to_string()),
            Some(t.low.to_string()),
            Some(t.days_since_low.to_string()),
            t.pct_from_low.map(|v| v.to_string()),
            f.high.map(|v| v.to_string()),
            f.pct_from_high.map(|v| v.to_string()),
            f.low.map(|v| v.to_string()),
            f.pct_from_low.map(|v| v.to_string()),
        ]
    }
}

/// A series augmented with rolling metrics, plus the windows that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
    params: WindowParams,
    rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn params(&self) -> WindowParams {
        self.params
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers with the window sizes embedded, e.g. `High_Last_7_Days`.
    pub fn column_names(&self) -> Vec<String> {
        let w1 = self.params.trailing;
        let w2 = self.params.forward;
        vec![
            "date".to_string(),
            "Open".to_string(),
            "High".to_string(),
            "Low".to_string(),
            "Close".to_string(),
            format!("High_Last_{w1}_Days"),
            format!("Days_Since_High_Last_{w1}_Days"),
            format!("%_Diff_From_High_Last_{w1}_Days"),
            format!("Low_Last_{w1}_Days"),
            format!("Days_Since_Low_Last_{w1}_Days"),
            format!("%_Diff_From_Low_Last_{w1}_Days"),
            format!("High_Next_{w2}_Days"),
            format!("%_Diff_From_High_Next_{w2}_Days"),
            format!("Low_Next_{w2}_Days"),
            format!("%_Diff_From_Low_Next_{w2}_Days"),
        ]
    }
}

/// Computes [`MetricTable`]s for a fixed pair of windows.
#[derive(Debug, Clone, Copy)]
pub struct MetricsEngine {
    params: WindowParams,
}

impl MetricsEngine {
    pub fn new(params: WindowParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> WindowParams {
        self.params
    }

    /// Augments every record of `series`. An empty series yields an empty table.
    pub fn compute(&self, series: &OhlcSeries) -> MetricTable {
        let highs = series.highs();
        let lows = series.lows();
        let trailing = self.params.trailing;
        let forward = self.params.forward;

        let trailing_highs = trailing_extremes(&highs, trailing, Extremum::Max);
        let trailing_lows = trailing_extremes(&lows, trailing, Extremum::Min);
        let forward_highs = forward_extremes(&highs, forward, Extremum::Max);
        let forward_lows = forward_extremes(&lows, forward, Extremum::Min);

        let rows = series
            .iter()
            .zip(trailing_highs)
            .zip(trailing_lows)
            .zip(forward_highs.into_iter().zip(forward_lows))
            .enumerate()
            .map(|(i, (((record, (high_idx, high)), (low_idx, low)), (next_high, next_low)))| {
                let close = record.close;
                MetricRow {
                    record: *record,
                    trailing: TrailingStats {
                        high,
                        days_since_high: i - high_idx,
                        pct_from_high: pct_diff(close, high),
                        low,
                        days_since_low: i - low_idx,
                        pct_from_low: pct_diff(close, low),
                    },
                    forward: ForwardStats {
                        high: next_high,
                        pct_from_high: next_high.and_then(|h| pct_diff(close, h)),
                        low: next_low,
                        pct_from_low: next_low.and_then(|l| pct_diff(close, l)),
                    },
                }
            })
            .collect();

        MetricTable {
            params: self.params,
            rows,
        }
    }
}

/// `(value - reference) / reference * 100`, missing when `reference` is zero.
pub fn pct_diff(value: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 {
        return None;
    }
    Some((value - reference) / reference * 100.0)
}
