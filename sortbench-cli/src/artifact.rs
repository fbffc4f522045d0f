//! Timing Executable Build Step
//!
//! The executable is compiled once, as `<compiler> <sources...> -o <artifact>`.
//! Whether that is needed is decided by the caller and passed in as a
//! [`BuildState`]; a present artifact is never rebuilt, even if its sources
//! changed since.

use crate::config::BuildConfig;
use sortbench_exchange::ProcessRunner;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while compiling the timing executable
#[derive(Debug, Error)]
pub enum BuildError {
    /// The compiler process could not be started
    #[error("Failed to start compiler {compiler}: {source}")]
    Spawn {
        /// Compiler program
        compiler: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The compiler exited unsuccessfully
    #[error("Compiler {compiler} failed with exit code {code:?}")]
    Failed {
        /// Compiler program
        compiler: String,
        /// Exit code, absent when killed by a signal
        code: Option<i32>,
    },
}

/// Whether the timing executable still has to be compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Artifact present; skip compilation
    Built,
    /// Artifact absent; compile before the first trial
    NeedsBuild,
}

impl BuildState {
    /// Inspect the filesystem for `artifact`
    pub fn detect(artifact: &Path) -> Self {
        if artifact.exists() {
            BuildState::Built
        } else {
            BuildState::NeedsBuild
        }
    }
}

/// Compile the timing executable if `state` says so.
///
/// Returns [`BuildState::Built`] on success.
pub fn ensure_built<R: ProcessRunner>(
    config: &BuildConfig,
    state: BuildState,
    runner: &R,
) -> Result<BuildState, BuildError> {
    if state == BuildState::Built {
        return Ok(BuildState::Built);
    }

    info!(
        compiler = %config.compiler,
        artifact = %config.artifact.display(),
        "compiling timing executable"
    );

    let mut args: Vec<&OsStr> = config.sources.iter().map(|s| s.as_os_str()).collect();
    args.push(OsStr::new("-o"));
    args.push(config.artifact.as_os_str());

    let outcome = runner
        .run(Path::new(&config.compiler), &args)
        .map_err(|source| BuildError::Spawn {
            compiler: config.compiler.clone(),
            source,
        })?;

    if !outcome.success() {
        return Err(BuildError::Failed {
            compiler: config.compiler.clone(),
            code: outcome.code,
        });
    }

    Ok(BuildState::Built)
}

/// Delete the compiled artifact. Returns whether a file was removed.
pub fn remove_artifact(artifact: &Path) -> std::io::Result<bool> {
    match std::fs::remove_file(artifact) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
