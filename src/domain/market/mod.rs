// Daily price series domain
pub mod date_range;
pub mod ohlc;

pub use date_range::DateRange;
pub use ohlc::{DailyBar, OhlcRecord, OhlcSeries};
