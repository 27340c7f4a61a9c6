use std::sync::Arc;

use opsrunner_core::scripting::runner::ScriptRunner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Script runner bound to the configured scripts directory.
    pub runner: Arc<ScriptRunner>,
}

impl AppState {
    /// Build state from configuration, wiring the runner to the configured
    /// directory and interpreter.
    pub fn from_config(config: ServerConfig) -> Self {
        let runner = ScriptRunner::new(config.scripts.runner_config(), config.scripts.executor());
        Self {
            config: Arc::new(config),
            runner: Arc::new(runner),
        }
    }
}
