#![warn(missing_docs)]
//! SortBench Report - Aggregation and Output
//!
//! Reduces every measurement table to one summary row of per-algorithm means,
//! writes the summary table, then rewrites it transposed (test classes as
//! columns, metrics as rows).
//!
//! Output formats for the resulting [`SummaryTable`]:
//! - JSON (machine-readable, with run metadata)
//! - CSV (the transposed summary layout)

mod aggregate;
mod csv;
mod json;
mod report;

pub use aggregate::{AggregateError, Aggregator, INDEX_LABEL, transpose_summary};
pub use csv::generate_csv_report;
pub use json::generate_json_report;
pub use report::{AlgorithmSummary, ClassSummary, Report, ReportMeta, SummaryTable, format_mean};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with metadata and full column statistics
    Json,
    /// Transposed summary CSV
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
