//! Integration tests for the file endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{DEVICE, TestApp, by_id};

#[tokio::test]
async fn test_register_unfiled_file() {
    let app = TestApp::new();

    let file = app.register_file("notes.txt", None).await;

    assert!(file["folderId"].is_null());
    assert_eq!(file["folderPath"], "/");
}

#[tokio::test]
async fn test_register_into_missing_folder() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "x", "folderId": "00000000-0000-0000-0000-000000000001" })),
            Some(DEVICE),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.files().await.is_empty());
}

#[tokio::test]
async fn test_move_files_between_folders() {
    let app = TestApp::new();
    let docs = app.create_folder("Docs", None).await;
    let a = app.register_file("a.pdf", None).await;
    let b = app.register_file("b.pdf", None).await;

    let response = app
        .request(
            "POST",
            "/api/files/move",
            Some(json!({
                "fileIds": [a["id"], "00000000-0000-0000-0000-000000000009"],
                "targetFolderId": docs["id"],
            })),
            Some(DEVICE),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let files = response.list();
    assert_eq!(files.len(), 2);
    assert_eq!(by_id(&files, &a["id"])["folderPath"], "/Docs");
    assert!(by_id(&files, &b["id"])["folderId"].is_null());

    let inside = app
        .request(
            "GET",
            &format!("/api/files?folderId={}", docs["id"].as_str().unwrap()),
            None,
            Some(DEVICE),
        )
        .await;
    assert_eq!(inside.list().len(), 1);

    let back = app
        .request(
            "POST",
            "/api/files/move",
            Some(json!({ "fileIds": [a["id"]], "targetFolderId": null })),
            Some(DEVICE),
        )
        .await;
    assert_eq!(by_id(&back.list(), &a["id"])["folderPath"], "/");
}

#[tokio::test]
async fn test_move_files_to_missing_folder() {
    let app = TestApp::new();
    let a = app.register_file("a.pdf", None).await;

    let response = app
        .request(
            "POST",
            "/api/files/move",
            Some(json!({
                "fileIds": [a["id"]],
                "targetFolderId": "00000000-0000-0000-0000-000000000001",
            })),
            Some(DEVICE),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new();
    let a = app.register_file("a.pdf", None).await;
    let path = format!("/api/files/{}", a["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None, Some(DEVICE)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &path, None, Some(DEVICE)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_ids_are_invalid_input() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/files/not-a-uuid", None, Some(DEVICE))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");

    let response = app
        .request("GET", "/api/files?folderId=nope", None, Some(DEVICE))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
}
