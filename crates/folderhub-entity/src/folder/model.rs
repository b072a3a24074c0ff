//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folderhub_core::types::{DeviceId, FolderId};

/// A folder in a device's hierarchy.
///
/// `path` and `depth` are derived from the parent chain and are only
/// written by the path maintainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// The owning device.
    pub device_id: DeviceId,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// Display name. Not unique among siblings.
    pub name: String,
    /// Full materialized path (e.g., `/Docs/2024`).
    pub path: String,
    /// Depth in the folder tree (0 for root).
    pub depth: i32,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last mutated.
    pub last_modified: DateTime<Utc>,
}

impl Folder {
    /// Build a new record with a freshly generated identifier.
    pub fn create(data: CreateFolder) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            device_id: data.device_id,
            parent_id: data.parent_id,
            name: data.name,
            path: data.path,
            depth: data.depth,
            created_at: now,
            last_modified: now,
        }
    }

    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Path a child named `name` would have under this folder.
    pub fn child_path(&self, name: &str) -> String {
        join_path(Some(&self.path), name)
    }
}

/// Join a parent path and a folder name into a materialized path.
///
/// Root folders have no parent path and become `/<name>`.
pub fn join_path(parent_path: Option<&str>, name: &str) -> String {
    format!("{}/{}", parent_path.unwrap_or(""), name)
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolder {
    /// The owning device.
    pub device_id: DeviceId,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// Full materialized path.
    pub path: String,
    /// Depth in the tree.
    pub depth: i32,
}
