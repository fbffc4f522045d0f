//! Column Statistics
//!
//! Table cells arrive as text. Padded (empty) cells and anything that does not
//! parse to a finite number are skipped.

use crate::summary::{SummaryStatistics, compute_summary};
use serde::Serialize;

/// Statistics of one table column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    /// Numeric cells used
    pub count: usize,
    /// Empty or non-numeric cells ignored
    pub skipped: usize,
    /// `None` when no cell was numeric
    pub summary: Option<SummaryStatistics>,
}

impl ColumnStatistics {
    /// Arithmetic mean of the numeric cells
    pub fn mean(&self) -> Option<f64> {
        self.summary.as_ref().map(|s| s.mean)
    }
}

/// Split cells into finite numeric values and a count of skipped cells
pub fn parse_cells<S: AsRef<str>>(cells: &[S]) -> (Vec<f64>, usize) {
    let mut values = Vec::with_capacity(cells.len());
    let mut skipped = 0;

    for cell in cells {
        match cell.as_ref().trim().parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            _ => skipped += 1,
        }
    }

    (values, skipped)
}

/// Compute statistics over a column of raw cells
pub fn compute_column_statistics<S: AsRef<str>>(cells: &[S]) -> ColumnStatistics {
    let (values, skipped) = parse_cells(cells);
    ColumnStatistics {
        count: values.len(),
        skipped,
        summary: compute_summary(&values),
    }
}
