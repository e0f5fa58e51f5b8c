use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use tempfile::TempDir;
use tower::ServiceExt;

use fundbook_server::{api::app_router, build_state, config::Config};

pub const DEMO_USER: &str = "demo-user";

/// Builds a router backed by a fresh, migrated database in a temp directory.
/// The `TempDir` guard must outlive the router or the database file vanishes
/// mid-test.
pub async fn build_test_app() -> (axum::Router, TempDir) {
    for key in ["FUNDBOOK_DATABASE_URL", "DATABASE_URL"] {
        std::env::remove_var(key);
    }
    let tmp = TempDir::new().expect("temp dir");
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().expect("listen addr"),
        data_dir: tmp.path().to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_millis(30_000),
    };
    let state = build_state(&config).await.expect("build state");
    (app_router(state, &config), tmp)
}

pub fn request(
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Sends the request and returns `(status, body)`. Non-JSON bodies come back
/// as a JSON string value so plain-text endpoints assert the same way.
pub async fn send(app: &axum::Router, req: Request<Body>) -> (u16, serde_json::Value) {
    let response = app.clone().oneshot(req).await.expect("response");
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    if bytes.is_empty() {
        return (status, serde_json::Value::Null);
    }
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(&bytes).to_string())
    });
    (status, json)
}
