//! File filing: registration, listing, moves between folders, deletion.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::{FileId, FolderId, ROOT_PATH};
use folderhub_database::store::{FileStore, FolderStore};
use folderhub_entity::file::{CreateFile, File};

use crate::context::DeviceContext;

/// Data for registering a new file.
#[derive(Debug, Clone)]
pub struct RegisterFileRequest {
    /// File name.
    pub name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Folder to file it under (None leaves it unfiled).
    pub folder_id: Option<FolderId>,
}

/// Data for moving files to a different folder.
#[derive(Debug, Clone)]
pub struct MoveFilesRequest {
    /// Files to move.
    pub file_ids: Vec<FileId>,
    /// Target folder (None moves them to the root).
    pub target_folder_id: Option<FolderId>,
}

/// Handles file records and their placement in the hierarchy.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store (for target lookups).
    folders: Arc<dyn FolderStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { files, folders }
    }

    /// Lists the device's files, or only those directly in `folder_id`.
    pub async fn list_files(
        &self,
        ctx: &DeviceContext,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<File>> {
        match folder_id {
            Some(folder_id) => {
                self.target_path(ctx, folder_id).await?;
                self.files.find_by_folder(ctx.device(), folder_id).await
            }
            None => self.files.find_all(ctx.device()).await,
        }
    }

    /// Gets a file by ID.
    pub async fn get_file(&self, ctx: &DeviceContext, file_id: FileId) -> AppResult<File> {
        self.files
            .find_by_id(ctx.device(), file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Creates a file record, filed under `folder_id` or left unfiled.
    pub async fn register_file(
        &self,
        ctx: &DeviceContext,
        req: RegisterFileRequest,
    ) -> AppResult<File> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("File name cannot be empty"));
        }
        if req.size_bytes < 0 {
            return Err(AppError::invalid_input("File size cannot be negative"));
        }

        let folder_path = match req.folder_id {
            Some(folder_id) => self.target_path(ctx, folder_id).await?,
            None => ROOT_PATH.to_string(),
        };

        let file = File::create(CreateFile {
            device_id: ctx.device_id.clone(),
            folder_id: req.folder_id,
            folder_path,
            name: name.to_string(),
            mime_type: req.mime_type,
            size_bytes: req.size_bytes,
        });
        self.files.insert(&file).await?;

        info!(
            device_id = %ctx.device_id,
            file_id = %file.id,
            folder_path = %file.folder_path,
            "File registered"
        );

        Ok(file)
    }

    /// Re-files a set of files and returns the device's full file listing.
    ///
    /// IDs that do not belong to the device are silently skipped.
    pub async fn move_files(
        &self,
        ctx: &DeviceContext,
        req: MoveFilesRequest,
    ) -> AppResult<Vec<File>> {
        let folder_path = match req.target_folder_id {
            Some(folder_id) => self.target_path(ctx, folder_id).await?,
            None => ROOT_PATH.to_string(),
        };

        let moved = self
            .files
            .move_files(
                ctx.device(),
                &req.file_ids,
                req.target_folder_id,
                &folder_path,
                Utc::now(),
            )
            .await?;

        info!(
            device_id = %ctx.device_id,
            requested = req.file_ids.len(),
            moved,
            folder_path = %folder_path,
            "Files moved"
        );

        self.files.find_all(ctx.device()).await
    }

    /// Deletes a single file record.
    pub async fn delete_file(&self, ctx: &DeviceContext, file_id: FileId) -> AppResult<()> {
        if !self.files.delete(ctx.device(), file_id).await? {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        info!(device_id = %ctx.device_id, file_id = %file_id, "File deleted");
        Ok(())
    }

    /// Current path of a target folder, or `NotFound`.
    async fn target_path(&self, ctx: &DeviceContext, folder_id: FolderId) -> AppResult<String> {
        self.folders
            .find_by_id(ctx.device(), folder_id)
            .await?
            .map(|folder| folder.path)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }
}
