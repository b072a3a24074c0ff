//! File registration and filing handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use folderhub_core::types::FileId;
use folderhub_entity::file::File;

use crate::dto::request::{ListFilesQuery, MoveFilesRequest, RegisterFileRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, DeviceKey, ValidatedJson};
use crate::state::AppState;

/// GET /api/files?folderId=...
pub async fn list_files(
    State(state): State<AppState>,
    device: DeviceKey,
    ApiQuery(query): ApiQuery<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state
        .file_service
        .list_files(&device, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/files
pub async fn register_file(
    State(state): State<AppState>,
    device: DeviceKey,
    ValidatedJson(req): ValidatedJson<RegisterFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let file = state.file_service.register_file(&device, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// POST /api/files/move
pub async fn move_files(
    State(state): State<AppState>,
    device: DeviceKey,
    ValidatedJson(req): ValidatedJson<MoveFilesRequest>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.file_service.move_files(&device, req.into()).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    device: DeviceKey,
    ApiPath(id): ApiPath<FileId>,
) -> Result<StatusCode, ApiError> {
    state.file_service.delete_file(&device, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
