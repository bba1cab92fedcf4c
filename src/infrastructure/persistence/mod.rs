pub mod csv_export;

pub use csv_export::{export_metrics_csv, write_metrics_csv};
