//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use folderhub_api::{AppState, build_router};
use folderhub_core::config::{AppConfig, HierarchyConfig};
use folderhub_database::Stores;

/// Device key used by most tests.
pub const DEVICE: &str = "test-device";

/// Test application context backed by the in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with default limits.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom hierarchy limits.
    pub fn with_limits(hierarchy: HierarchyConfig) -> Self {
        Self::with_config(AppConfig {
            hierarchy,
            ..AppConfig::default()
        })
    }

    fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config, Stores::memory());
        Self {
            router: build_router(state),
        }
    }

    /// Make a request as `device` (no header when `None`).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        device: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(device) = device {
            req = req.header("X-Device-Id", device);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder as [`DEVICE`] and return its record.
    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Value {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(DEVICE),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response
            .list()
            .into_iter()
            .find(|f| f["name"] == name && f["parentId"].as_str() == parent_id)
            .expect("Created folder missing from listing")
    }

    /// Register a file as [`DEVICE`] and return its record.
    pub async fn register_file(&self, name: &str, folder_id: Option<&str>) -> Value {
        let response = self
            .request(
                "POST",
                "/api/files",
                Some(serde_json::json!({ "name": name, "sizeBytes": 10, "folderId": folder_id })),
                Some(DEVICE),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// Current folder listing for [`DEVICE`].
    pub async fn folders(&self) -> Vec<Value> {
        self.request("GET", "/api/folders", None, Some(DEVICE))
            .await
            .list()
    }

    /// Current file listing for [`DEVICE`].
    pub async fn files(&self) -> Vec<Value> {
        self.request("GET", "/api/files", None, Some(DEVICE))
            .await
            .list()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` array of a listing response.
    pub fn list(&self) -> Vec<Value> {
        self.body["data"].as_array().cloned().unwrap_or_default()
    }

    /// The `error` code of an error response.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Look a record up by id in a listing.
pub fn by_id<'a>(records: &'a [Value], id: &Value) -> &'a Value {
    records
        .iter()
        .find(|r| &r["id"] == id)
        .expect("Record missing from listing")
}
