//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use folderhub_core::types::{FileId, FolderId};
use folderhub_service::file::{MoveFilesRequest as SvcMoveFiles, RegisterFileRequest as SvcRegister};
use folderhub_service::folder::{
    CreateFolderRequest as SvcCreateFolder, UpdateFolderRequest as SvcUpdateFolder,
};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

impl From<CreateFolderRequest> for SvcCreateFolder {
    fn from(req: CreateFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

/// Rename and/or move request. `"parentId": null` moves the folder to the root.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// New name.
    #[validate(length(min = 1, message = "Folder name cannot be empty"))]
    pub name: Option<String>,
    /// New parent.
    #[serde(default, deserialize_with = "explicit_null")]
    pub parent_id: Option<Option<FolderId>>,
}

impl From<UpdateFolderRequest> for SvcUpdateFolder {
    fn from(req: UpdateFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

/// Register file request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFileRequest {
    /// File name.
    #[validate(length(min = 1, message = "File name is required"))]
    pub name: String,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    #[validate(range(min = 0, message = "File size cannot be negative"))]
    pub size_bytes: i64,
    /// Folder to file it under.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

impl From<RegisterFileRequest> for SvcRegister {
    fn from(req: RegisterFileRequest) -> Self {
        Self {
            name: req.name,
            mime_type: req.mime_type,
            size_bytes: req.size_bytes,
            folder_id: req.folder_id,
        }
    }
}

/// Move files request. A null or missing target moves the files to the root.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveFilesRequest {
    /// Files to move.
    pub file_ids: Vec<FileId>,
    /// Target folder.
    #[serde(default)]
    pub target_folder_id: Option<FolderId>,
}

impl From<MoveFilesRequest> for SvcMoveFiles {
    fn from(req: MoveFilesRequest) -> Self {
        Self {
            file_ids: req.file_ids,
            target_folder_id: req.target_folder_id,
        }
    }
}

/// Query parameters for `GET /api/files`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Only list files directly in this folder.
    pub folder_id: Option<FolderId>,
}
