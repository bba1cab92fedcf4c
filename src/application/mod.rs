// Market data fetching and rolling metrics
pub mod market_data;

// Fetch -> compute orchestration
pub mod pipeline;

// Console output
pub mod reporting;
