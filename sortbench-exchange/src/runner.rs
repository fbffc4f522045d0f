//! Process Runner
//!
//! Blocking, single-shot process execution. The harness suspends until the
//! child exits; there is no timeout, so a hung executable hangs the harness.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ProcessOutcome {
    /// Outcome of a process that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Capability to run an external program to completion
pub trait ProcessRunner {
    /// Run `program` with `args` and block until it exits.
    fn run(&self, program: &Path, args: &[&OsStr]) -> std::io::Result<ProcessOutcome>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, program: &Path, args: &[&OsStr]) -> std::io::Result<ProcessOutcome> {
        (**self).run(program, args)
    }
}

/// Runs programs with `std::process::Command`.
///
/// stdin and stdout are discarded; stderr is inherited so compiler and
/// executable diagnostics stay visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl ProcessRunner for CommandRunner {
    fn run(&self, program: &Path, args: &[&OsStr]) -> std::io::Result<ProcessOutcome> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.into())
    }
}
