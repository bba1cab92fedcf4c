pub mod core;
pub mod cryptocompare;
pub mod mock;
pub mod persistence;

pub use cryptocompare::CryptoCompareHistoryService;
pub use mock::MockHistorySource;
