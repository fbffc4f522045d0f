#![warn(missing_docs)]
//! SortBench Statistics
//!
//! Reduces a column of raw table cells to summary statistics:
//! - Cells that are empty or not finite numbers are skipped and counted, never
//!   treated as zero
//! - Mean, median, stddev, min, max and tail percentiles over the numeric cells

mod column;
mod percentiles;
mod summary;

pub use column::{ColumnStatistics, compute_column_statistics, parse_cells};
pub use percentiles::compute_percentile;
pub use summary::{SummaryStatistics, compute_summary};
