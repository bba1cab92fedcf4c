/// Backward pagination against the in-memory history source.
use chrono::NaiveDate;
use pricetrail::application::market_data::HistoryFetcher;
use pricetrail::domain::market::{DailyBar, DateRange, OhlcSeries};
use pricetrail::domain::market::date_range::{SECONDS_PER_DAY, day_timestamp};
use pricetrail::infrastructure::MockHistorySource;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn fetch_with_page_size(source: MockHistorySource, page_size: usize, range: DateRange) -> OhlcSeries {
    HistoryFetcher::new(Arc::new(source))
        .with_page_size(page_size)
        .fetch("BTC", range)
        .await
        .expect("fetch should succeed")
}

fn assert_contained_and_ordered(series: &OhlcSeries, range: DateRange) {
    for record in series.iter() {
        assert!(range.contains(record.date), "{} outside {}", record.date, range);
    }
    for pair in series.records().windows(2) {
        assert!(pair[0].date < pair[1].date, "not strictly ascending at {}", pair[1].date);
    }
}

#[tokio::test]
async fn test_range_containment_and_ordering() {
    let range = DateRange::new(date(2020, 3, 15), date(2020, 11, 2)).unwrap();

    for page_size in [1, 2, 7, 30, 2000] {
        let source = MockHistorySource::synthetic(date(2019, 1, 1), 900);
        let series = fetch_with_page_size(source, page_size, range).await;

        assert_contained_and_ordered(&series, range);
        assert_eq!(series.first_date(), Some(range.start()));
        assert_eq!(series.last_date(), Some(range.end()));
    }
}

#[tokio::test]
async fn test_pagination_equivalence() {
    let range = DateRange::new(date(2019, 2, 10), date(2021, 4, 30)).unwrap();

    let reference =
        fetch_with_page_size(MockHistorySource::synthetic(date(2019, 1, 1), 900), 2000, range).await;

    for page_size in [3, 10, 64, 365] {
        let series = fetch_with_page_size(
            MockHistorySource::synthetic(date(2019, 1, 1), 900),
            page_size,
            range,
        )
        .await;
        assert_eq!(series, reference, "page_size={}", page_size);
    }
}

#[tokio::test]
async fn test_gaps_and_duplicates_in_source() {
    // Missing days stay missing; a duplicated day appears once.
    let origin = day_timestamp(date(2022, 5, 1));
    let bar = |day: i64, close: f64| DailyBar {
        time: origin + day * SECONDS_PER_DAY,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
    };
    let bars = vec![bar(0, 10.0), bar(1, 11.0), bar(3, 13.0), bar(3, 13.0), bar(4, 14.0), bar(7, 17.0)];
    let range = DateRange::new(date(2022, 5, 1), date(2022, 5, 8)).unwrap();

    for page_size in [1, 2, 100] {
        let series = fetch_with_page_size(MockHistorySource::new(bars.clone()), page_size, range).await;
        assert_contained_and_ordered(&series, range);
        let closes: Vec<f64> = series.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![10.0, 11.0, 13.0, 14.0, 17.0], "page_size={}", page_size);
    }
}

#[tokio::test]
async fn test_end_date_after_last_available_day() {
    let range = DateRange::new(date(2024, 1, 20), date(2024, 6, 1)).unwrap();
    let series =
        fetch_with_page_size(MockHistorySource::synthetic(date(2024, 1, 1), 31), 5, range).await;

    assert_eq!(series.len(), 12);
    assert_eq!(series.last_date(), Some(date(2024, 1, 31)));
}
