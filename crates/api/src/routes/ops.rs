//! Route definitions for the ops script endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ops;
use crate::state::AppState;

/// Ops routes, mounted at the root.
///
/// ```text
/// POST   /run-script                -> run_script
/// GET    /scripts                   -> list_scripts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/run-script", post(ops::run_script))
        .route("/scripts", get(ops::list_scripts))
}
