use std::path::PathBuf;
use std::time::Duration;

use opsrunner_core::scripting::interpreter::InterpreterExecutor;
use opsrunner_core::scripting::runner::{RunnerConfig, DEFAULT_SCRIPT_EXTENSION};

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error(
        "REQUEST_TIMEOUT_SECS ({request_secs}) must be greater than SCRIPT_TIMEOUT_SECS ({script_secs})"
    )]
    RequestTimeoutTooShort { request_secs: u64, script_secs: u64 },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `330`).
    ///
    /// Kept above the script timeout so a slow script is reported as an
    /// execution failure rather than cut off by the transport.
    pub request_timeout_secs: u64,
    /// Script runner settings.
    pub scripts: ScriptsConfig,
}

/// Where scripts live and how they are run.
#[derive(Debug, Clone)]
pub struct ScriptsConfig {
    /// Scripts directory (default: `./scripts`).
    pub dir: PathBuf,
    /// Extension appended to logical names (default: `sh`).
    pub extension: String,
    /// Interpreter program (default: `bash`).
    pub interpreter: String,
    /// Extra interpreter arguments placed before the script path.
    pub interpreter_args: Vec<String>,
    /// Per-script timeout in seconds (default: `300`).
    pub timeout_secs: u64,
}

impl ScriptsConfig {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            scripts_dir: self.dir.clone(),
            extension: self.extension.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn executor(&self) -> InterpreterExecutor {
        InterpreterExecutor::new(self.interpreter.clone(), self.interpreter_args.clone())
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `330`                   |
    /// | `SCRIPTS_DIR`             | `./scripts`             |
    /// | `SCRIPT_EXTENSION`        | `sh`                    |
    /// | `SCRIPT_INTERPRETER`      | `bash`                  |
    /// | `SCRIPT_INTERPRETER_ARGS` | (none)                  |
    /// | `SCRIPT_TIMEOUT_SECS`     | `300`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number("PORT", &var("PORT", "3000"), "u16")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_number(
            "REQUEST_TIMEOUT_SECS",
            &var("REQUEST_TIMEOUT_SECS", "330"),
            "u64",
        )?;

        let extension = var("SCRIPT_EXTENSION", DEFAULT_SCRIPT_EXTENSION)
            .trim_start_matches('.')
            .to_string();
        if extension.is_empty() {
            return Err(ConfigError::Empty("SCRIPT_EXTENSION"));
        }

        let interpreter = var("SCRIPT_INTERPRETER", "bash");
        if interpreter.trim().is_empty() {
            return Err(ConfigError::Empty("SCRIPT_INTERPRETER"));
        }

        let interpreter_args = var("SCRIPT_INTERPRETER_ARGS", "")
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let timeout_secs = parse_number(
            "SCRIPT_TIMEOUT_SECS",
            &var("SCRIPT_TIMEOUT_SECS", "300"),
            "u64",
        )?;

        // The transport timeout answers without a JSON body, so the script
        // timeout has to fire first.
        if request_timeout_secs <= timeout_secs {
            return Err(ConfigError::RequestTimeoutTooShort {
                request_secs: request_timeout_secs,
                script_secs: timeout_secs,
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            scripts: ScriptsConfig {
                dir: PathBuf::from(var("SCRIPTS_DIR", "./scripts")),
                extension,
                interpreter,
                interpreter_args,
                timeout_secs,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        expected,
        value: value.to_string(),
    })
}
