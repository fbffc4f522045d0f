//! Aggregation Pass
//!
//! Every run rebuilds the summary from the measurement tables, so repeating an
//! aggregation always yields the same transposed file.

use crate::report::{AlgorithmSummary, ClassSummary, SummaryTable};
use sortbench_corpus::TestClass;
use sortbench_stats::compute_column_statistics;
use sortbench_store::{MeasurementStore, StoreError, TABLE_EXTENSION, Table, elapsed_column};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Label of the key column in the transposed summary
pub const INDEX_LABEL: &str = "Index";

/// Errors raised while building the summary
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A requested class has no measurement table
    #[error("No measurements for {class}: {} does not exist", path.display())]
    MissingTable {
        /// Class that was requested
        class: TestClass,
        /// Expected table location
        path: PathBuf,
    },

    /// The summary file name would replace a measurement table
    #[error("Summary name {name:?} collides with the {class} measurement table")]
    SummaryNameCollision {
        /// Configured summary name
        name: String,
        /// Class whose table shares the name
        class: TestClass,
    },

    /// The summary file already has the transposed layout
    #[error("Summary {} is already transposed", .0.display())]
    AlreadyTransposed(PathBuf),

    /// Reading or writing the summary file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Summary file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading a measurement table failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AggregateError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        AggregateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reduces measurement tables to the summary table
#[derive(Debug)]
pub struct Aggregator<'a> {
    store: &'a MeasurementStore,
    algorithms: Vec<String>,
    results_name: String,
    summary_path: PathBuf,
}

impl<'a> Aggregator<'a> {
    /// Aggregator writing `<store dir>/<results_name>.csv`
    pub fn new<S: AsRef<str>>(store: &'a MeasurementStore, algorithms: &[S], results_name: &str) -> Self {
        let summary_path = store
            .dir()
            .join(format!("{}.{}", results_name, TABLE_EXTENSION));
        Self {
            store,
            algorithms: algorithms.iter().map(|a| a.as_ref().to_string()).collect(),
            results_name: results_name.to_string(),
            summary_path,
        }
    }

    /// Location of the summary file
    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Rebuild the summary for `classes`, then rewrite it transposed.
    ///
    /// Refuses to run when the summary would overwrite a measurement table.
    pub fn run(&self, classes: &[TestClass]) -> Result<SummaryTable, AggregateError> {
        if let Some(class) = TestClass::from_table_name(&self.results_name) {
            return Err(AggregateError::SummaryNameCollision {
                name: self.results_name.clone(),
                class,
            });
        }

        match fs::remove_file(&self.summary_path) {
            Ok(()) => debug!(path = %self.summary_path.display(), "removed previous summary"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(AggregateError::io(&self.summary_path, e)),
        }

        let mut summaries = Vec::with_capacity(classes.len());
        for &class in classes {
            summaries.push(self.summarize(class)?);
        }

        let summary = SummaryTable {
            algorithms: self.algorithms.clone(),
            classes: summaries,
        };

        let contents = summary.to_table().to_csv()?;
        fs::write(&self.summary_path, contents)
            .map_err(|e| AggregateError::io(&self.summary_path, e))?;

        transpose_summary(&self.summary_path)?;
        info!(
            path = %self.summary_path.display(),
            classes = summary.classes.len(),
            "wrote summary"
        );
        Ok(summary)
    }

    fn summarize(&self, class: TestClass) -> Result<ClassSummary, AggregateError> {
        let table = self.store.read_all(class).map_err(|e| match e {
            StoreError::MissingTable { path, .. } => AggregateError::MissingTable { class, path },
            other => AggregateError::Store(other),
        })?;

        let algorithms = self
            .algorithms
            .iter()
            .map(|algorithm| {
                let column = elapsed_column(algorithm);
                let cells = table.column(&column).unwrap_or_else(|| {
                    warn!(table = class.table_name(), column = %column, "column missing from table");
                    vec![""; table.len()]
                });
                let statistics = compute_column_statistics(&cells);
                if statistics.skipped > 0 {
                    warn!(
                        table = class.table_name(),
                        column = %column,
                        skipped = statistics.skipped,
                        "skipped non-numeric cells"
                    );
                }
                AlgorithmSummary {
                    algorithm: algorithm.clone(),
                    statistics,
                }
            })
            .collect();

        Ok(ClassSummary {
            class,
            name: class.table_name().to_string(),
            rows: table.len(),
            algorithms,
        })
    }
}

/// Rewrite a row-oriented summary file with rows and columns swapped.
///
/// Refuses a file that already starts with the [`INDEX_LABEL`] column.
pub fn transpose_summary(path: &Path) -> Result<Table, AggregateError> {
    let contents = fs::read_to_string(path).map_err(|e| AggregateError::io(path, e))?;
    let table = Table::parse(&contents);
    if table.header().first().map(String::as_str) == Some(INDEX_LABEL) {
        return Err(AggregateError::AlreadyTransposed(path.to_path_buf()));
    }

    let transposed = table.transpose(INDEX_LABEL);
    fs::write(path, transposed.to_csv()?).map_err(|e| AggregateError::io(path, e))?;
    Ok(transposed)
}
