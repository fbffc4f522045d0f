//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::Serialize;
use sortbench_corpus::TestClass;
use sortbench_stats::ColumnStatistics;
use sortbench_store::{Schema, Table};

/// Render a mean for the summary table; a column without numeric cells is an empty cell.
pub fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| m.to_string()).unwrap_or_default()
}

/// Statistics of one algorithm's elapsed-time column
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSummary {
    /// Algorithm name as configured
    pub algorithm: String,
    /// Statistics over the column's numeric cells
    pub statistics: ColumnStatistics,
}

/// Reduced measurement table of one test class
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    /// Test class
    pub class: TestClass,
    /// Table name of the class
    pub name: String,
    /// Measurement rows read
    pub rows: usize,
    /// One entry per configured algorithm
    pub algorithms: Vec<AlgorithmSummary>,
}

impl ClassSummary {
    /// Mean elapsed time per algorithm, in algorithm order
    pub fn means(&self) -> Vec<Option<f64>> {
        self.algorithms.iter().map(|a| a.statistics.mean()).collect()
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    /// Algorithm names, in schema order
    pub algorithms: Vec<String>,
    /// One entry per aggregated class, in request order
    pub classes: Vec<ClassSummary>,
}

impl SummaryTable {
    /// Row-oriented summary: `Test Name, Mean (ms - <a>)...`, one row per class
    pub fn to_table(&self) -> Table {
        let schema = Schema::summary(&self.algorithms);
        let mut table = Table::new(schema.columns().to_vec());
        for class in &self.classes {
            let mut row = Vec::with_capacity(schema.len());
            row.push(class.name.clone());
            row.extend(class.means().into_iter().map(format_mean));
            table.push_row(row);
        }
        table
    }

    /// Summary of `class`, if it was aggregated
    pub fn class(&self, class: TestClass) -> Option<&ClassSummary> {
        self.classes.iter().find(|c| c.class == class)
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// When the report was generated
    pub timestamp: DateTime<Utc>,
    /// Algorithm names
    pub algorithms: Vec<String>,
}

/// Complete machine-readable report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Per-class summaries
    pub classes: Vec<ClassSummary>,
}

impl Report {
    /// Wrap a summary with metadata stamped now
    pub fn new(summary: &SummaryTable) -> Self {
        Self {
            meta: ReportMeta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                algorithms: summary.algorithms.clone(),
            },
            classes: summary.classes.clone(),
        }
    }
}
