//! Exchange File Lifecycle
//!
//! open (write line 1) → invoke executable → close (read all, delete file,
//! remove scratch directory once empty).

use crate::record::ExchangeRecord;
use crate::runner::{ProcessOutcome, ProcessRunner};
use sortbench_corpus::format_sequence;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Errors that abort a single exchange
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The timing executable removed or never kept the exchange file
    #[error("Exchange file missing after invocation: {}", .0.display())]
    Missing(PathBuf),

    /// Reading, writing or removing an exchange file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The timing executable could not be started
    #[error("Failed to run {}: {source}", program.display())]
    Spawn {
        /// Timing executable
        program: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ExchangeError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ExchangeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Drives the external timing executable through exchange files in a scratch directory
pub struct Exchange<R> {
    scratch_dir: PathBuf,
    executable: PathBuf,
    runner: R,
}

impl<R: ProcessRunner> Exchange<R> {
    /// Create an exchange rooted at `scratch_dir` that invokes `executable`
    pub fn new(scratch_dir: impl Into<PathBuf>, executable: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            executable: executable.into(),
            runner,
        }
    }

    /// Scratch directory holding in-flight exchange files
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Executable invoked for each exchange
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Write `input` as line 1 of a fresh, uniquely named exchange file.
    ///
    /// Creates the scratch directory if needed and returns the file path.
    pub fn open_exchange(&self, input: &[i64]) -> Result<PathBuf, ExchangeError> {
        fs::create_dir_all(&self.scratch_dir)
            .map_err(|e| ExchangeError::io(&self.scratch_dir, e))?;

        let path = self.scratch_dir.join(Uuid::new_v4().to_string());
        let mut contents = format_sequence(input);
        contents.push('\n');

        fs::write(&path, contents).map_err(|e| ExchangeError::io(&path, e))?;
        debug!(path = %path.display(), len = input.len(), "opened exchange file");
        Ok(path)
    }

    /// Run the executable with `path` as its only argument and wait for it to exit.
    ///
    /// A non-zero exit is logged, not raised: whether the trial produced data
    /// is decided when the file is read back.
    pub fn invoke(&self, path: &Path) -> Result<ProcessOutcome, ExchangeError> {
        let outcome = self
            .runner
            .run(&self.executable, &[path.as_os_str()])
            .map_err(|source| ExchangeError::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        if !outcome.success() {
            warn!(
                executable = %self.executable.display(),
                code = ?outcome.code,
                "timing executable exited unsuccessfully"
            );
        }
        Ok(outcome)
    }

    /// Read back every line of the exchange file, delete it, and remove the
    /// scratch directory if nothing else is left in it.
    pub fn close_exchange(&self, path: &Path) -> Result<ExchangeRecord, ExchangeError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let _ = self.clear_scratch();
                return Err(ExchangeError::Missing(path.to_path_buf()));
            }
            Err(e) => return Err(ExchangeError::io(path, e)),
        };

        let lines = contents.lines().map(|line| line.trim().to_string()).collect();

        fs::remove_file(path).map_err(|e| ExchangeError::io(path, e))?;
        debug!(path = %path.display(), "closed exchange file");

        self.clear_scratch()?;
        Ok(ExchangeRecord::from_lines(lines))
    }

    /// Full exchange for one input: open, invoke, close.
    ///
    /// If the executable cannot be started, the half-written exchange file is
    /// removed before the error is returned.
    pub fn round_trip(&self, input: &[i64]) -> Result<ExchangeRecord, ExchangeError> {
        let path = self.open_exchange(input)?;

        if let Err(e) = self.invoke(&path) {
            let _ = fs::remove_file(&path);
            let _ = self.clear_scratch();
            return Err(e);
        }

        self.close_exchange(&path)
    }

    /// Remove the scratch directory if it exists and is empty.
    ///
    /// Returns whether the directory was removed.
    pub fn clear_scratch(&self) -> Result<bool, ExchangeError> {
        let mut entries = match fs::read_dir(&self.scratch_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(ExchangeError::io(&self.scratch_dir, e)),
        };

        if entries.next().is_some() {
            return Ok(false);
        }

        fs::remove_dir(&self.scratch_dir).map_err(|e| ExchangeError::io(&self.scratch_dir, e))?;
        debug!(dir = %self.scratch_dir.display(), "removed empty scratch directory");
        Ok(true)
    }
}
