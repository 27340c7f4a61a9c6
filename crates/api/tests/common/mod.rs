#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use opsrunner_api::config::{ScriptsConfig, ServerConfig};
use opsrunner_api::router::build_app_router;
use opsrunner_api::state::AppState;

/// Build a test `ServerConfig` pointing at `scripts_dir`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// `bash` as interpreter and a 5-second script timeout.
pub fn test_config(scripts_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        scripts: ScriptsConfig {
            dir: scripts_dir.to_path_buf(),
            extension: "sh".to_string(),
            interpreter: "bash".to_string(),
            interpreter_args: Vec::new(),
            timeout_secs: 5,
        },
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(scripts_dir: &Path) -> Router {
    build_app_with_config(test_config(scripts_dir))
}

pub fn build_app_with_config(config: ServerConfig) -> Router {
    build_app_router(AppState::from_config(config)).expect("build router")
}

/// Write `<dir>/<name>.sh` containing `body` after a bash shebang.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(format!("{name}.sh"));
    std::fs::write(&path, format!("#!/bin/bash\n{body}")).expect("write script");
    path
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
