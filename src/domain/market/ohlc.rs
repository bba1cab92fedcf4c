use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One daily record as returned by the upstream histoday endpoint.
///
/// Extra fields in the payload (volumes, conversion info) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Epoch seconds of the day's open (UTC midnight).
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DailyBar {
    /// Calendar date of this bar, `None` for out-of-range timestamps.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.time, 0).map(|dt| dt.date_naive())
    }
}

/// A daily OHLC record keyed by calendar date.
///
/// Price relations (high >= low etc.) are trusted from the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcRecord {
    pub fn from_bar(bar: &DailyBar) -> Option<Self> {
        Some(Self {
            date: bar.date()?,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        })
    }
}

/// Records strictly ascending by date, no duplicate dates. Gaps are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    records: Vec<OhlcRecord>,
}

impl OhlcSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a series from records in any order.
    ///
    /// Records are sorted by date and later duplicates of a date are dropped.
    pub fn from_records(mut records: Vec<OhlcRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[OhlcRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn highs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.low).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OhlcRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a OhlcSeries {
    type Item = &'a OhlcRecord;
    type IntoIter = std::slice::Iter<'a, OhlcRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, close: f64) -> OhlcRecord {
        OhlcRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn test_from_records_sorts_and_dedups() {
        let series = OhlcSeries::from_records(vec![
            record(2024, 1, 3, 3.0),
            record(2024, 1, 1, 1.0),
            record(2024, 1, 3, 99.0),
            record(2024, 1, 2, 2.0),
        ]);

        let closes: Vec<f64> = series.iter().map(|r| r.close).collect();
        assert_eq!(series.len(), 3);
        assert_eq!(closes[0], 1.0);
        assert_eq!(closes[1], 2.0);
        // Stable sort keeps the first record seen for a duplicated date.
        assert_eq!(closes[2], 3.0);
    }

    #[test]
    fn test_bar_date_conversion() {
        let bar = DailyBar {
            time: 1_704_067_200,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        };
        let rec = OhlcRecord::from_bar(&bar).unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(rec.high, 2.0);
    }
}
