#![warn(missing_docs)]
//! # SortBench
//!
//! Benchmark harness that measures sorting algorithms implemented in an
//! external timing executable across differently shaped inputs.
//!
//! - **Corpus Generation**: sorted, reverse-sorted, partially sorted, random and outlier inputs from an injected RNG
//! - **Exchange Protocol**: one short-lived text file per trial, handed to the executable as its sole argument
//! - **Measurement Store**: append-only CSV table per test class, with indices that survive restarts
//! - **Aggregation**: per-algorithm means per class, written as a summary table and then transposed
//!
//! ## Quick Start
//!
//! ```text
//! sortbench init             # write sortbench.toml
//! sortbench --seed 42        # build timing executable, run trials, aggregate
//! sortbench analyze --format json
//! ```
//!
//! ## Library Use
//!
//! ```ignore
//! use sortbench::{CommandRunner, SortbenchConfig, TestClass, analyze, run_trials};
//!
//! let config = SortbenchConfig::default();
//! run_trials(&config, &TestClass::ALL, CommandRunner, false)?;
//! let summary = analyze(&config, &TestClass::ALL)?;
//! ```

// Re-export corpus types
pub use sortbench_corpus::{
    CorpusParams, GenerationError, TestClass, format_sequence, generate, parse_sequence,
};

// Re-export exchange types
pub use sortbench_exchange::{
    CommandRunner, Exchange, ExchangeError, ExchangeRecord, ProcessOutcome, ProcessRunner,
};

// Re-export store types
pub use sortbench_store::{MappedRow, MeasurementStore, Schema, StoreError, Table};

// Re-export stats
pub use sortbench_stats::{ColumnStatistics, SummaryStatistics, compute_column_statistics};

// Re-export aggregation and reporting
pub use sortbench_report::{
    AggregateError, Aggregator, OutputFormat, SummaryTable, transpose_summary,
};

// Re-export harness
pub use sortbench_cli::{
    BuildState, ExecutionConfig, Executor, SortbenchConfig, TrialError, TrialSummary, analyze,
    ensure_built, run_trials,
};

/// Run the SortBench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     sortbench::run()
/// }
/// ```
pub use sortbench_cli::run;
