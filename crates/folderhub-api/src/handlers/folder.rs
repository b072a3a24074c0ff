//! Folder hierarchy handlers.
//!
//! Every mutation answers with the device's complete folder listing.

use axum::Json;
use axum::extract::State;

use folderhub_core::types::FolderId;
use folderhub_entity::folder::{Folder, FolderTree};

use crate::dto::request::{CreateFolderRequest, UpdateFolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, DeviceKey, ValidatedJson};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    device: DeviceKey,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.folder_service.list_folders(&device).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/tree
pub async fn get_tree(
    State(state): State<AppState>,
    device: DeviceKey,
) -> Result<Json<ApiResponse<FolderTree>>, ApiError> {
    let tree = state.tree_service.get_tree(&device).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    device: DeviceKey,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .create_folder(&device, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// PATCH /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    device: DeviceKey,
    ApiPath(id): ApiPath<FolderId>,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .rename_or_move(&device, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    device: DeviceKey,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.folder_service.delete_folder(&device, id).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn get_breadcrumbs(
    State(state): State<AppState>,
    device: DeviceKey,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let trail = state.tree_service.get_breadcrumbs(&device, id).await?;
    Ok(Json(ApiResponse::ok(trail)))
}
