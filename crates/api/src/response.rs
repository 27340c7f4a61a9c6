//! Shared response envelope types for API handlers.
//!
//! Listing endpoints use the `{ "data": ... }` envelope ([`DataResponse`]).
//! The run endpoint answers with [`ScriptExecutionResult`] for every outcome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opsrunner_core::error::CoreError;
use opsrunner_core::scripting::executor::ScriptOutput;
use serde::{Deserialize, Serialize};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

pub const MSG_SUCCESS: &str = "script executed successfully";
pub const MSG_INVALID_NAME: &str = "invalid script name";
pub const MSG_EXECUTION_FAILED: &str = "script execution failed";

/// Body returned by `POST /run-script`, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptExecutionResult {
    pub success: bool,
    pub message: String,
    /// Captured stdout, present on success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Captured stderr or error message, present on execution failure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScriptExecutionResult {
    pub fn succeeded(output: String) -> Self {
        Self {
            success: true,
            message: MSG_SUCCESS.to_string(),
            output: Some(output),
            error: None,
        }
    }

    pub fn invalid_name() -> Self {
        Self::failed(MSG_INVALID_NAME.to_string(), None)
    }

    pub fn not_found(name: &str) -> Self {
        Self::failed(format!("script {name} not found"), None)
    }

    pub fn execution_failed(error: String) -> Self {
        Self::failed(MSG_EXECUTION_FAILED.to_string(), Some(error))
    }

    fn failed(message: String, error: Option<String>) -> Self {
        Self {
            success: false,
            message,
            output: None,
            error,
        }
    }
}

/// A run outcome paired with its HTTP status.
#[derive(Debug)]
pub struct RunScriptResponse {
    pub status: StatusCode,
    pub body: ScriptExecutionResult,
}

impl From<Result<ScriptOutput, CoreError>> for RunScriptResponse {
    fn from(result: Result<ScriptOutput, CoreError>) -> Self {
        let (status, body) = match result {
            Ok(output) => (
                StatusCode::OK,
                ScriptExecutionResult::succeeded(output.stdout),
            ),
            Err(CoreError::InvalidScriptName(_)) => (
                StatusCode::BAD_REQUEST,
                ScriptExecutionResult::invalid_name(),
            ),
            Err(CoreError::ScriptNotFound { name }) => (
                StatusCode::NOT_FOUND,
                ScriptExecutionResult::not_found(&name),
            ),
            Err(CoreError::Execution(error)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ScriptExecutionResult::execution_failed(error),
            ),
        };
        Self { status, body }
    }
}

impl IntoResponse for RunScriptResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str) -> ScriptOutput {
        ScriptOutput {
            stdout: stdout.to_string(),
            stderr: "ignored".to_string(),
            exit_code: 0,
            duration_ms: 3,
        }
    }

    #[test]
    fn success_carries_stdout_only() {
        let resp = RunScriptResponse::from(Ok(output("OK\n")));
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&resp.body).expect("serialize"),
            serde_json::json!({
                "success": true,
                "message": "script executed successfully",
                "output": "OK\n",
            })
        );
    }

    #[test]
    fn invalid_name_omits_output_and_error() {
        let resp = RunScriptResponse::from(Err(CoreError::InvalidScriptName("../x".into())));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&resp.body).expect("serialize"),
            serde_json::json!({ "success": false, "message": "invalid script name" })
        );
    }

    #[test]
    fn not_found_names_the_script() {
        let resp = RunScriptResponse::from(Err(CoreError::ScriptNotFound {
            name: "backup".into(),
        }));
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.body.message, "script backup not found");
    }

    #[test]
    fn execution_failure_carries_error_text() {
        let resp = RunScriptResponse::from(Err(CoreError::Execution("boom\n".into())));
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body, ScriptExecutionResult::execution_failed("boom\n".into()));
        assert_eq!(resp.body.message, "script execution failed");
        assert!(resp.body.output.is_none());
    }
}
