//! Script execution interface and shared types.
//!
//! Defines [`ScriptExecutor`], the seam between the runner and the OS process
//! facility, along with [`ScriptInput`], [`ScriptOutput`], and [`ScriptError`].

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-run parameters handed to an executor.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    /// Working directory for the child process (inherits ours if `None`).
    pub working_directory: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Stdout captured from the process, up to the per-stream cap.
    pub stdout: String,
    /// Stderr captured from the process, up to the per-stream cap.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScriptOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Failures that prevent a process from running to completion.
///
/// A non-zero exit is *not* an error at this layer; it is reported through
/// [`ScriptOutput::exit_code`] and interpreted by the runner.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script exceeded its timeout and was killed.
    #[error("script timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },

    /// Spawning or communicating with the process failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Runs a located script file and reports what it printed and how it exited.
///
/// Implementations must pass the path as a discrete argument, never through
/// a shell command string.
pub trait ScriptExecutor: Send + Sync {
    /// Execute the script at `script_path` with the given `input`.
    fn execute(
        &self,
        script_path: &Path,
        input: ScriptInput,
    ) -> impl std::future::Future<Output = Result<ScriptOutput, ScriptError>> + Send;
}
