//! In-memory folder store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FolderId};
use folderhub_entity::folder::Folder;

use crate::store::FolderStore;

/// One device's folders plus a parent → children index.
///
/// The index keeps child lookups O(children) instead of a scan over the
/// whole device.
#[derive(Debug, Default)]
struct DeviceFolders {
    folders: HashMap<FolderId, Folder>,
    children: HashMap<Option<FolderId>, HashSet<FolderId>>,
}

impl DeviceFolders {
    fn link(&mut self, parent_id: Option<FolderId>, id: FolderId) {
        self.children.entry(parent_id).or_default().insert(id);
    }

    fn unlink(&mut self, parent_id: Option<FolderId>, id: FolderId) {
        if let Some(siblings) = self.children.get_mut(&parent_id) {
            siblings.remove(&id);
            if siblings.is_empty() {
                self.children.remove(&parent_id);
            }
        }
    }
}

/// Folder store backed by a [`DashMap`] sharded per device.
///
/// Each device's records sit behind one map entry, so operations on
/// different devices never contend.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderStore {
    devices: Arc<DashMap<DeviceId, DeviceFolders>>,
}

impl MemoryFolderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_by_id(&self, device_id: &DeviceId, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self
            .devices
            .get(device_id)
            .and_then(|device| device.folders.get(&id).cloned()))
    }

    async fn find_children(
        &self,
        device_id: &DeviceId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let Some(device) = self.devices.get(device_id) else {
            return Ok(Vec::new());
        };
        let mut children: Vec<Folder> = device
            .children
            .get(&Some(parent_id))
            .into_iter()
            .flatten()
            .filter_map(|id| device.folders.get(id).cloned())
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<Folder>> {
        Ok(self
            .devices
            .get(device_id)
            .map(|device| device.folders.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, folder: &Folder) -> AppResult<()> {
        let mut device = self.devices.entry(folder.device_id.clone()).or_default();
        if device.folders.contains_key(&folder.id) {
            return Err(AppError::store_failure(format!(
                "Folder id {} already exists",
                folder.id
            )));
        }
        device.link(folder.parent_id, folder.id);
        device.folders.insert(folder.id, folder.clone());
        Ok(())
    }

    async fn update(&self, folder: &Folder) -> AppResult<()> {
        let not_found = || AppError::not_found(format!("Folder {} not found", folder.id));
        let mut device = self.devices.get_mut(&folder.device_id).ok_or_else(not_found)?;

        let old_parent = match device.folders.get_mut(&folder.id) {
            Some(existing) => {
                let old_parent = existing.parent_id;
                existing.name = folder.name.clone();
                existing.parent_id = folder.parent_id;
                existing.path = folder.path.clone();
                existing.depth = folder.depth;
                existing.last_modified = folder.last_modified;
                old_parent
            }
            None => return Err(not_found()),
        };

        if old_parent != folder.parent_id {
            device.unlink(old_parent, folder.id);
            device.link(folder.parent_id, folder.id);
        }
        Ok(())
    }

    async fn set_path(
        &self,
        device_id: &DeviceId,
        id: FolderId,
        path: &str,
        depth: i32,
    ) -> AppResult<bool> {
        let Some(mut device) = self.devices.get_mut(device_id) else {
            return Ok(false);
        };
        match device.folders.get_mut(&id) {
            Some(folder) => {
                folder.path = path.to_string();
                folder.depth = depth;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch(
        &self,
        device_id: &DeviceId,
        id: FolderId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let Some(mut device) = self.devices.get_mut(device_id) else {
            return Ok(false);
        };
        match device.folders.get_mut(&id) {
            Some(folder) => {
                folder.last_modified = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_many(&self, device_id: &DeviceId, ids: &[FolderId]) -> AppResult<u64> {
        let Some(mut device) = self.devices.get_mut(device_id) else {
            return Ok(0);
        };
        let mut removed = 0u64;
        for id in ids {
            if let Some(folder) = device.folders.remove(id) {
                device.unlink(folder.parent_id, folder.id);
                device.children.remove(&Some(folder.id));
                removed += 1;
            }
        }
        debug!(device_id = %device_id, removed, "Deleted folders from memory store");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
