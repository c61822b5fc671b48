//! Test utilities and in-process server harness.
//!
//! Provides:
//! - Temporary database fixture with the schema applied
//! - JSON request helpers driving the router with `oneshot`

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use servicedesk::config::Config;
use servicedesk::observability::tracing::init_test_tracing;
use servicedesk::server::{build_router, prepare_store, ServerState};
use servicedesk::storage::Store;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture that owns a temporary database and the router over it.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestApp {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
    pub store: Store,
    router: Router,
}

impl TestApp {
    /// Create a fixture with a fresh, initialized database.
    pub fn new() -> Self {
        init_test_tracing();
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let store = prepare_store(&Config::test_config(db_path.clone())).expect("failed to prepare store");
        let router = build_router(Arc::new(ServerState::new(store.clone())));
        Self {
            temp_dir,
            db_path,
            store,
            router,
        }
    }

    /// Send a request and return the status and parsed JSON body.
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        self.send(request).await
    }

    /// Send a prebuilt request.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    /// Open a direct connection to the fixture database.
    pub fn connection(&self) -> rusqlite::Connection {
        self.store.open().expect("failed to open store")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
