//! Domain logic for the ops script runner.
//!
//! Everything here is free of HTTP concerns: script-name validation, path
//! resolution, subprocess management and the [`ScriptRunner`] that ties them
//! together. The `api` crate wraps it in an Axum router.
//!
//! [`ScriptRunner`]: scripting::runner::ScriptRunner

pub mod error;
pub mod scripting;
