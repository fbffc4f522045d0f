#![warn(missing_docs)]
//! SortBench Exchange Protocol
//!
//! Hands one input sequence to an external timing executable and reads back its
//! results through a short-lived text file. The file is a strict line-ordered
//! contract:
//!
//! ```text
//! line 1     input sequence (space-separated)     <- harness
//! line 2     sorted output sequence               <- executable
//! line 3..   elapsed time, one line per algorithm <- executable
//! ```
//!
//! The executable is driven through the [`ProcessRunner`] trait so tests can
//! substitute a fake that writes the response lines itself.

mod exchange;
mod record;
mod runner;

pub use exchange::{Exchange, ExchangeError};
pub use record::ExchangeRecord;
pub use runner::{CommandRunner, ProcessOutcome, ProcessRunner};

/// Line number (1-based) of the input sequence
pub const INPUT_LINE: usize = 1;

/// Line number (1-based) of the sorted output sequence
pub const OUTPUT_LINE: usize = 2;

/// Line number (1-based) of the first elapsed-time value
pub const FIRST_TIMING_LINE: usize = 3;
