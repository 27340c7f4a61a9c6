//! Interpreter-backed executor.
//!
//! Spawns `<program> [args...] <script_path>` with an argument vector. The
//! script path is always its own argument, so nothing in it is ever
//! interpreted by a shell.

use std::path::Path;

use super::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use super::subprocess;

/// Executor that runs scripts through an external interpreter (`bash` by default).
#[derive(Debug, Clone)]
pub struct InterpreterExecutor {
    program: String,
    args: Vec<String>,
}

impl InterpreterExecutor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `bash <script>`.
    pub fn bash() -> Self {
        Self::new("bash", Vec::new())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for InterpreterExecutor {
    fn default() -> Self {
        Self::bash()
    }
}

impl ScriptExecutor for InterpreterExecutor {
    async fn execute(
        &self,
        script_path: &Path,
        input: ScriptInput,
    ) -> Result<ScriptOutput, ScriptError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args).arg(script_path);
        subprocess::run_command(&mut cmd, input).await
    }
}
