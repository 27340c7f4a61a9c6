//! The script runner: validate, resolve, check, execute.
//!
//! [`ScriptRunner`] is constructed once with an injected [`RunnerConfig`] and
//! shared behind an `Arc`. It holds no mutable state, so overlapping runs are
//! fully independent. There is no locking, ordering, or de-duplication
//! between them.

use std::path::PathBuf;
use std::time::Duration;

use super::executor::{ScriptExecutor, ScriptInput, ScriptOutput};
use super::interpreter::InterpreterExecutor;
use super::name::{validate_script_name, ScriptName};
use crate::error::CoreError;

/// Default script timeout (5 minutes).
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default script file extension, without the leading dot.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "sh";

/// Where scripts live and how long they may run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root directory holding every script reachable through the runner.
    pub scripts_dir: PathBuf,
    /// File extension appended to the logical name, without the dot.
    pub extension: String,
    /// Maximum wall-clock time per run.
    pub timeout: Duration,
}

impl RunnerConfig {
    pub fn new(scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            timeout: DEFAULT_SCRIPT_TIMEOUT,
        }
    }
}

/// Runs scripts from a fixed directory through a [`ScriptExecutor`].
pub struct ScriptRunner<E = InterpreterExecutor> {
    config: RunnerConfig,
    executor: E,
}

impl<E: ScriptExecutor> ScriptRunner<E> {
    pub fn new(config: RunnerConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Map a validated name to `<scripts_dir>/<name>.<extension>`.
    pub fn resolve(&self, name: &ScriptName) -> PathBuf {
        self.config
            .scripts_dir
            .join(format!("{}.{}", name, self.config.extension))
    }

    /// Run the script named `raw_name` and wait for it to exit.
    ///
    /// Returns the captured output only when the process exits with code 0.
    /// Validation and existence failures never spawn a process.
    pub async fn run(&self, raw_name: &str) -> Result<ScriptOutput, CoreError> {
        let name = validate_script_name(raw_name).inspect_err(|_| {
            tracing::warn!(script = %raw_name.escape_debug(), "Rejected unsafe script name");
        })?;

        let path = self.resolve(&name);

        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::info!(script = %name, path = %path.display(), "Script not found");
            return Err(CoreError::ScriptNotFound {
                name: name.to_string(),
            });
        }

        tracing::info!(script = %name, path = %path.display(), "Running script");

        let input = ScriptInput {
            working_directory: Some(self.config.scripts_dir.clone()),
            timeout: self.config.timeout,
        };

        match self.executor.execute(&path, input).await {
            Ok(output) if output.succeeded() => {
                tracing::info!(
                    script = %name,
                    duration_ms = output.duration_ms,
                    "Script completed"
                );
                Ok(output)
            }
            Ok(output) => {
                tracing::warn!(
                    script = %name,
                    exit_code = output.exit_code,
                    duration_ms = output.duration_ms,
                    "Script exited with failure"
                );
                Err(CoreError::Execution(failure_text(&output)))
            }
            Err(err) => {
                tracing::error!(script = %name, error = %err, "Script did not complete");
                Err(CoreError::Execution(err.to_string()))
            }
        }
    }

    /// Logical names of every script currently in the scripts directory.
    ///
    /// Only regular files with the configured extension whose stem is itself
    /// a valid logical name are listed. Sorted for stable output.
    pub async fn list_scripts(&self) -> std::io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.config.scripts_dir).await?;
        let suffix = format!(".{}", self.config.extension);
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(&suffix) else {
                continue;
            };
            if validate_script_name(stem).is_ok() {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Diagnostic text for a process that exited non-zero: stderr verbatim, or a
/// synthesized message when the script printed nothing to stderr.
fn failure_text(output: &ScriptOutput) -> String {
    if output.stderr.is_empty() {
        format!("script exited with code {}", output.exit_code)
    } else {
        output.stderr.clone()
    }
}
