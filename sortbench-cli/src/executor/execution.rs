//! Trial Execution
//!
//! Sequential trial loop: for every planned class, draw parameters and generate
//! an input, then round-trip it through the timing executable `repetitions`
//! times, appending one measurement row per round-trip.
//!
//! A failing trial is logged and counted; the loop moves on to the next one.

use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sortbench_corpus::{CorpusParams, GenerationError, TestClass, generate};
use sortbench_exchange::{Exchange, ExchangeError, ProcessRunner};
use sortbench_store::{MeasurementStore, StoreError};
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::{debug, error, info};

/// Failure of a single trial
#[derive(Debug, Error)]
pub enum TrialError {
    /// Generator parameters could not be satisfied
    #[error("Input generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The exchange with the timing executable failed
    #[error("Exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    /// The row could not be appended to its table
    #[error("Recording measurement failed: {0}")]
    Store(#[from] StoreError),
}

/// Configuration for trial execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Distinct generated inputs per class
    pub inputs_per_class: usize,
    /// Round-trips per generated input
    pub repetitions: usize,
    /// Range every generator parameter is drawn from
    pub param_range: RangeInclusive<u64>,
    /// Fixed RNG seed; entropy-seeded when `None`
    pub seed: Option<u64>,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            inputs_per_class: 100,
            repetitions: 10,
            param_range: 100..=10_000,
            seed: None,
            show_progress: true,
        }
    }
}

impl ExecutionConfig {
    /// Trials the plan will attempt
    pub fn total_trials(&self, classes: usize) -> usize {
        classes * self.inputs_per_class * self.repetitions
    }
}

/// Outcome counts of one trial loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialSummary {
    /// Trials started
    pub attempted: usize,
    /// Trials whose row was appended
    pub succeeded: usize,
    /// Trials that raised a [`TrialError`]
    pub failed: usize,
    /// Appended rows that needed padding or dropped surplus values
    pub inexact_rows: usize,
}

impl TrialSummary {
    /// Whether trials were attempted and none of them succeeded
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

/// Runs trials against one exchange and one measurement store
pub struct Executor<'a, R> {
    config: ExecutionConfig,
    exchange: &'a Exchange<R>,
    store: &'a MeasurementStore,
    summary: TrialSummary,
}

impl<'a, R: ProcessRunner> Executor<'a, R> {
    /// Create a new executor
    pub fn new(config: ExecutionConfig, exchange: &'a Exchange<R>, store: &'a MeasurementStore) -> Self {
        Self {
            config,
            exchange,
            store,
            summary: TrialSummary::default(),
        }
    }

    /// Run every trial for `classes`.
    ///
    /// Tables are created for every class up front, so a class whose trials all
    /// fail still has a (header-only) table to aggregate.
    pub fn execute(&mut self, classes: &[TestClass]) -> Result<TrialSummary, StoreError> {
        for &class in classes {
            self.store.ensure_table(class)?;
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let total = self.config.total_trials(classes.len());
        let pb = if self.config.show_progress {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        info!(
            classes = classes.len(),
            inputs = self.config.inputs_per_class,
            repetitions = self.config.repetitions,
            "starting trials"
        );

        for &class in classes {
            pb.set_message(class.table_name());
            for input_index in 0..self.config.inputs_per_class {
                let input = CorpusParams::draw(&mut rng, self.config.param_range.clone())
                    .and_then(|params| {
                        debug!(table = class.table_name(), input_index, ?params, "generating input");
                        generate(&mut rng, class, &params)
                    });

                let input = match input {
                    Ok(input) => input,
                    Err(e) => {
                        // Every repetition of this input is lost
                        let e = TrialError::from(e);
                        error!(table = class.table_name(), input_index, error = %e, "trial failed");
                        self.summary.attempted += self.config.repetitions;
                        self.summary.failed += self.config.repetitions;
                        pb.inc(self.config.repetitions as u64);
                        continue;
                    }
                };

                for repetition in 0..self.config.repetitions {
                    self.summary.attempted += 1;
                    match self.run_trial(class, &input) {
                        Ok(exact) => {
                            self.summary.succeeded += 1;
                            if !exact {
                                self.summary.inexact_rows += 1;
                            }
                        }
                        Err(e) => {
                            error!(
                                table = class.table_name(),
                                input_index,
                                repetition,
                                error = %e,
                                "trial failed"
                            );
                            self.summary.failed += 1;
                        }
                    }
                    pb.inc(1);
                }
            }
        }

        pb.finish_with_message("Complete");
        Ok(self.summary)
    }

    /// One exchange round-trip plus its measurement row.
    ///
    /// Returns whether the response matched the schema width exactly.
    pub fn run_trial(&self, class: TestClass, input: &[i64]) -> Result<bool, TrialError> {
        let record = self.exchange.round_trip(input)?;
        let row = self.store.schema().map_values(record.into_values());
        self.store.append_row(class, &row)?;
        Ok(row.is_exact())
    }

    /// Counts accumulated so far
    pub fn summary(&self) -> TrialSummary {
        self.summary
    }
}
