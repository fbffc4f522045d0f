//! Column Schemas
//!
//! Column names and order are fixed once from the configured algorithm names.
//! The first column is always the row key; the rest are value columns.

use serde::Serialize;

/// Row index column of measurement tables
pub const INDEX_COLUMN: &str = "Test";
/// Input sequence column
pub const INPUT_COLUMN: &str = "Input Array";
/// Output sequence column
pub const OUTPUT_COLUMN: &str = "Output Array";
/// Key column of the summary table
pub const SUMMARY_KEY_COLUMN: &str = "Test Name";

/// Elapsed-time column name for `algorithm`
pub fn elapsed_column(algorithm: &str) -> String {
    format!("Elapsed Time (ms - {})", algorithm)
}

/// Mean column name for `algorithm`
pub fn mean_column(algorithm: &str) -> String {
    format!("Mean (ms - {})", algorithm)
}

/// Ordered column list of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    columns: Vec<String>,
    /// Position of the first per-algorithm column
    metric_start: usize,
}

impl Schema {
    /// `Test, Input Array, Output Array, Elapsed Time (ms - <a>)...`
    pub fn measurement<S: AsRef<str>>(algorithms: &[S]) -> Self {
        let mut columns = vec![
            INDEX_COLUMN.to_string(),
            INPUT_COLUMN.to_string(),
            OUTPUT_COLUMN.to_string(),
        ];
        columns.extend(algorithms.iter().map(|a| elapsed_column(a.as_ref())));
        Self {
            columns,
            metric_start: 3,
        }
    }

    /// `Test Name, Mean (ms - <a>)...`
    pub fn summary<S: AsRef<str>>(algorithms: &[S]) -> Self {
        let mut columns = vec![SUMMARY_KEY_COLUMN.to_string()];
        columns.extend(algorithms.iter().map(|a| mean_column(a.as_ref())));
        Self {
            columns,
            metric_start: 1,
        }
    }

    /// All columns, key first
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns after the key column
    pub fn value_columns(&self) -> &[String] {
        &self.columns[1..]
    }

    /// Per-algorithm columns
    pub fn metric_columns(&self) -> &[String] {
        &self.columns[self.metric_start..]
    }

    /// Number of columns, key included
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns (never true for built schemas)
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Map ordered raw values onto the value columns.
    ///
    /// Missing trailing values become empty strings; surplus values are
    /// discarded. Both are counted on the returned row.
    pub fn map_values<I, S>(&self, values: I) -> MappedRow
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let width = self.value_columns().len();
        let mut mapped: Vec<String> = Vec::with_capacity(width);
        let mut dropped = 0;

        for value in values {
            if mapped.len() < width {
                mapped.push(value.into());
            } else {
                dropped += 1;
            }
        }

        let padded = width - mapped.len();
        mapped.resize(width, String::new());

        MappedRow {
            values: mapped,
            padded,
            dropped,
        }
    }
}

/// Raw values mapped onto a schema's value columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    values: Vec<String>,
    padded: usize,
    dropped: usize,
}

impl MappedRow {
    /// Values in value-column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Trailing columns filled with empty values
    pub fn padded(&self) -> usize {
        self.padded
    }

    /// Surplus raw values that had no column
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Every column received a value and nothing was discarded
    pub fn is_exact(&self) -> bool {
        self.padded == 0 && self.dropped == 0
    }
}
