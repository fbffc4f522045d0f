#![warn(missing_docs)]
//! SortBench Measurement Store
//!
//! Durable, append-only CSV tables, one per test class:
//! - A fixed column [`Schema`] shared by every table
//! - Explicit mapping of raw exchange lines onto schema columns ([`MappedRow`])
//! - Sequential row indices recomputed from the file on every append
//!
//! Files are opened and closed per operation; nothing holds a lock between trials.

mod schema;
mod store;
mod table;

pub use schema::{
    INDEX_COLUMN, INPUT_COLUMN, MappedRow, OUTPUT_COLUMN, SUMMARY_KEY_COLUMN, Schema,
    elapsed_column, mean_column,
};
pub use store::{MeasurementStore, StoreError};
pub use table::{Table, format_line, parse_line};

/// File extension of every table
pub const TABLE_EXTENSION: &str = "csv";
