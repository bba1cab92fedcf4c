//! CSV persistence for metric tables.
//!
//! The header embeds the window sizes; missing values are written as empty fields.

use crate::application::market_data::metrics::MetricTable;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn write_metrics_csv<W: Write>(table: &MetricTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(table.column_names())
        .context("Failed to write CSV header")?;

    for row in table.rows() {
        let cells = row.cells();
        wtr.write_record(cells.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .with_context(|| format!("Failed to write CSV row for {}", row.record.date))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

pub fn export_metrics_csv(table: &MetricTable, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_metrics_csv(table, file)?;

    info!("Saved {} rows to '{}'", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::market_data::metrics::{MetricsEngine, WindowParams};
    use crate::domain::market::{OhlcRecord, OhlcSeries};
    use chrono::NaiveDate;

    fn table() -> MetricTable {
        let d1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let series = OhlcSeries::from_records(vec![
            OhlcRecord {
                date: d1,
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
            },
            OhlcRecord {
                date: d1.succ_opt().unwrap(),
                open: 11.0,
                high: 15.0,
                low: 10.0,
                close: 14.0,
            },
        ]);
        MetricsEngine::new(WindowParams::new(7, 5).unwrap()).compute(&series)
    }

    #[test]
    fn test_header_and_missing_cells() {
        let mut buf = Vec::new();
        write_metrics_csv(&table(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,Open,High,Low,Close,High_Last_7_Days,"));
        assert!(lines[0].ends_with("%_Diff_From_Low_Next_5_Days"));
        assert!(lines[1].starts_with("2024-05-01,10,12,9,11,12,0,"));
        // Last row has no forward window: four trailing empty fields.
        assert!(lines[2].ends_with(",,,,"));
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let empty = MetricsEngine::new(WindowParams::new(3, 2).unwrap()).compute(&OhlcSeries::empty());
        let mut buf = Vec::new();
        write_metrics_csv(&empty, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("High_Next_2_Days"));
    }

    #[test]
    fn test_export_to_file() {
        let path = std::env::temp_dir().join(format!("pricetrail_export_{}.csv", std::process::id()));
        export_metrics_csv(&table(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text.lines().count(), 3);
    }
}
