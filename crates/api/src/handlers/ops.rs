//! Handlers for running and listing ops scripts.
//!
//! Authentication is expected to happen upstream of this service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::{DataResponse, RunScriptResponse, ScriptExecutionResult};
use crate::state::AppState;

/// Request body for `POST /run-script`.
#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    /// Logical script name: no extension, no path separators.
    #[serde(default)]
    pub script: String,
}

/// POST /run-script
///
/// Run the named script and wait for it to exit. The request stays open for
/// the lifetime of the child process. A body that does not parse as
/// `{ "script": "<string>" }` is answered as an invalid script name.
pub async fn run_script(
    State(state): State<AppState>,
    payload: Result<Json<ScriptRequest>, JsonRejection>,
) -> RunScriptResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected run-script body");
            return RunScriptResponse {
                status: axum::http::StatusCode::BAD_REQUEST,
                body: ScriptExecutionResult::invalid_name(),
            };
        }
    };

    state.runner.run(&request.script).await.into()
}

/// GET /scripts
///
/// List the logical names of every script in the scripts directory.
pub async fn list_scripts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let scripts = state.runner.list_scripts().await?;
    Ok(Json(DataResponse { data: scripts }))
}
