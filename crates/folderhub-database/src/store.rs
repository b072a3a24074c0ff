//! Store traits for folder and file records.
//!
//! Both traits expose point lookup, find-many by parent/folder, insert,
//! field update, and delete. Every method takes the owning device key and
//! must never read or write another device's records.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FileId, FolderId};
use folderhub_entity::file::File;
use folderhub_entity::folder::Folder;

/// Durable collection of folder records.
#[async_trait]
pub trait FolderStore: Send + Sync + fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, device_id: &DeviceId, id: FolderId) -> AppResult<Option<Folder>>;

    /// List the direct children of a folder.
    async fn find_children(
        &self,
        device_id: &DeviceId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>>;

    /// List every folder of a device, in no particular order.
    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<Folder>>;

    /// Insert a new folder record.
    async fn insert(&self, folder: &Folder) -> AppResult<()>;

    /// Persist `name`, `parent_id`, `path`, `depth`, and `last_modified`.
    ///
    /// Fails with `NotFound` when the record no longer exists.
    async fn update(&self, folder: &Folder) -> AppResult<()>;

    /// Overwrite the derived `path` and `depth` of one folder.
    ///
    /// Returns `false` when the folder does not exist.
    async fn set_path(
        &self,
        device_id: &DeviceId,
        id: FolderId,
        path: &str,
        depth: i32,
    ) -> AppResult<bool>;

    /// Bump `last_modified` without touching anything else.
    async fn touch(&self, device_id: &DeviceId, id: FolderId, at: DateTime<Utc>)
    -> AppResult<bool>;

    /// Delete a set of folders. Returns the number removed.
    async fn delete_many(&self, device_id: &DeviceId, ids: &[FolderId]) -> AppResult<u64>;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Durable collection of file records.
#[async_trait]
pub trait FileStore: Send + Sync + fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, device_id: &DeviceId, id: FileId) -> AppResult<Option<File>>;

    /// List every file of a device.
    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<File>>;

    /// List the files filed directly under a folder.
    async fn find_by_folder(&self, device_id: &DeviceId, folder_id: FolderId)
    -> AppResult<Vec<File>>;

    /// Number of files per folder (`None` = unfiled).
    async fn count_by_folder(
        &self,
        device_id: &DeviceId,
    ) -> AppResult<HashMap<Option<FolderId>, u64>>;

    /// Insert a new file record.
    async fn insert(&self, file: &File) -> AppResult<()>;

    /// Rewrite `folder_path` on every file filed under `folder_id`.
    async fn set_folder_path(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
        folder_path: &str,
    ) -> AppResult<u64>;

    /// Re-file a set of files. IDs that do not exist are ignored.
    async fn move_files(
        &self,
        device_id: &DeviceId,
        ids: &[FileId],
        folder_id: Option<FolderId>,
        folder_path: &str,
        at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Delete one file. Returns `false` when it did not exist.
    async fn delete(&self, device_id: &DeviceId, id: FileId) -> AppResult<bool>;

    /// Delete every file filed under any of `folder_ids`.
    async fn delete_in_folders(
        &self,
        device_id: &DeviceId,
        folder_ids: &[FolderId],
    ) -> AppResult<u64>;
}
