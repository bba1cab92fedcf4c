// Market data processing modules
pub mod fetcher;
pub mod metrics;
pub mod rolling_extremum;

pub use fetcher::HistoryFetcher;
pub use metrics::{MetricRow, MetricTable, MetricsEngine, WindowParams};
