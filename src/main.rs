//! Pricetrail CLI
//!
//! Fetches daily history for one crypto asset, derives rolling high/low metrics
//! and saves them as CSV.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use pricetrail::application::market_data::{HistoryFetcher, MetricsEngine, WindowParams};
use pricetrail::application::pipeline::MetricsPipeline;
use pricetrail::application::reporting::MetricsReporter;
use pricetrail::config::Config;
use pricetrail::domain::market::DateRange;
use pricetrail::infrastructure::CryptoCompareHistoryService;
use pricetrail::infrastructure::persistence::export_metrics_csv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(author, version, about = "Daily crypto history with rolling high/low metrics", long_about = None)]
struct Cli {
    /// Asset symbol (e.g. BTC, ETH)
    #[arg(short, long, default_value = "BTC")]
    asset: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long, default_value = "2017-10-01")]
    start: String,

    /// End date (YYYY-MM-DD), defaults to today (UTC)
    #[arg(long)]
    end: Option<String>,

    /// Trailing window in days
    #[arg(short, long, default_value = "7")]
    trailing: usize,

    /// Forward window in days
    #[arg(short, long, default_value = "5")]
    forward: usize,

    /// Output CSV file
    #[arg(short, long, default_value = "crypto_data_with_metrics.csv")]
    output: PathBuf,

    /// Rows shown at the head and tail of the console preview
    #[arg(long, default_value = "5")]
    preview: usize,

    /// Skip writing the CSV file
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let end = cli
        .end
        .clone()
        .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());
    let range = DateRange::parse(&cli.start, &end).context("Invalid date range")?;
    let params = WindowParams::new(cli.trailing, cli.forward).context("Invalid window sizes")?;

    let service = CryptoCompareHistoryService::from_config(&config.data_source, &config.http)
        .context("Failed to build HTTP client")?;
    let fetcher =
        HistoryFetcher::new(Arc::new(service)).with_page_size(config.data_source.page_size);
    let pipeline = MetricsPipeline::new(fetcher, MetricsEngine::new(params));

    let reporter = MetricsReporter::new(cli.preview);
    let output = (!cli.no_export).then(|| cli.output.display().to_string());
    reporter.print_header(&cli.asset, &cli.start, &end, output.as_deref());

    info!("Fetching {} history for {}", cli.asset, range);
    let report = pipeline.run(&cli.asset, range).await;
    if !report.is_complete() {
        warn!("Continuing with an empty table after fetch failure");
    }

    reporter.print_table(&report.table);

    if !cli.no_export {
        export_metrics_csv(&report.table, &cli.output)?;
        println!("Data saved to '{}'", cli.output.display());
    }

    Ok(())
}
