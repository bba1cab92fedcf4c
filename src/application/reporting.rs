//! Console output for metric tables.

use crate::application::market_data::MetricTable;

/// Prints a head/tail preview of a metric table.
pub struct MetricsReporter {
    preview_rows: usize,
}

impl Default for MetricsReporter {
    fn default() -> Self {
        Self { preview_rows: 5 }
    }
}

impl MetricsReporter {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn print_header(&self, asset: &str, start: &str, end: &str, output: Option<&str>) {
        println!("\n{}", "=".repeat(80));
        println!("📈 {} daily history {} → {}", asset, start, end);
        if let Some(output) = output {
            println!("   Output: {}", output);
        }
        println!("{}", "=".repeat(80));
    }

    pub fn print_table(&self, table: &MetricTable) {
        print!("{}", self.render(table));
    }

    /// Renders the preview: the first and last `preview_rows` rows, aligned.
    pub fn render(&self, table: &MetricTable) -> String {
        let headers = table.column_names();
        let total = table.len();

        // Rows in `head_end..tail_start` are hidden.
        let elided = total > self.preview_rows.saturating_mul(2);
        let head_end = if elided { self.preview_rows } else { total };
        let tail_start = total - head_end.min(self.preview_rows);

        let mut lines: Vec<Vec<String>> = Vec::new();
        for (i, row) in table.rows().iter().enumerate() {
            if i >= head_end && i < tail_start {
                continue;
            }
            let mut cells = vec![i.to_string()];
            cells.extend(row.cells().into_iter().map(|cell| match cell {
                Some(value) => shorten(&value),
                None => "NaN".to_string(),
            }));
            lines.push(cells);
        }

        let mut header_cells = vec![String::new()];
        header_cells.extend(headers);

        let widths: Vec<usize> = (0..header_cells.len())
            .map(|c| {
                lines
                    .iter()
                    .map(|line| line[c].len())
                    .chain(std::iter::once(header_cells[c].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = String::new();
        out.push_str(&format_line(&header_cells));
        out.push('\n');
        let (head, tail) = lines.split_at(head_end.min(lines.len()));
        for line in head {
            out.push_str(&format_line(line));
            out.push('\n');
        }
        if elided {
            out.push_str("...\n");
        }
        for line in tail {
            out.push_str(&format_line(line));
            out.push('\n');
        }
        out.push_str(&format!("\n[{} rows x {} columns]\n", total, header_cells.len() - 1));
        out
    }
}

/// Trims long float renderings to six decimals.
fn shorten(value: &str) -> String {
    match value.parse::<f64>() {
        Ok(v) if value.contains('.') => format!("{:.6}", v)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        _ => value.to_string(),
    }
}
