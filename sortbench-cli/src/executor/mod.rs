//! Trial Executor
//!
//! Runs trials and renders the aggregated results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionPlan (test classes)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Generate inputs, round-trip, append rows
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ Aggregator  │  Means per class, summary table (sortbench-report)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sequential trial loop with progress reporting
//! - [`formatting`] - Terminal output

pub mod execution;
pub mod formatting;

pub use execution::{ExecutionConfig, Executor, TrialError, TrialSummary};
pub use formatting::format_human_output;
