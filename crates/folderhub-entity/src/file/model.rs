//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folderhub_core::types::{DeviceId, FileId, FolderId, ROOT_PATH};

/// A file record filed under a device's hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The owning device.
    pub device_id: DeviceId,
    /// The folder containing this file; `None` means unfiled.
    pub folder_id: Option<FolderId>,
    /// Copy of the owning folder's path, or [`ROOT_PATH`] when unfiled.
    pub folder_path: String,
    /// The file name.
    pub name: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// When the file was registered.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub last_modified: DateTime<Utc>,
}

impl File {
    /// Build a new record with a freshly generated identifier.
    pub fn create(data: CreateFile) -> Self {
        let now = Utc::now();
        Self {
            id: FileId::new(),
            device_id: data.device_id,
            folder_id: data.folder_id,
            folder_path: data.folder_path,
            name: data.name,
            mime_type: data.mime_type,
            size_bytes: data.size_bytes,
            created_at: now,
            last_modified: now,
        }
    }

    /// Returns `true` if the file is not filed under any folder.
    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFile {
    /// The owning device.
    pub device_id: DeviceId,
    /// Target folder, if any.
    pub folder_id: Option<FolderId>,
    /// Path of the target folder, or [`ROOT_PATH`].
    pub folder_path: String,
    /// The file name.
    pub name: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
}

impl CreateFile {
    /// Creation payload for an unfiled file.
    pub fn unfiled(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            device_id,
            folder_id: None,
            folder_path: ROOT_PATH.to_string(),
            name: name.into(),
            mime_type: None,
            size_bytes: 0,
        }
    }
}
