//! In-memory file store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FileId, FolderId};
use folderhub_entity::file::File;

use crate::store::FileStore;

/// File store backed by a [`DashMap`] sharded per device.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    devices: Arc<DashMap<DeviceId, HashMap<FileId, File>>>,
}

impl MemoryFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_name(mut files: Vec<File>) -> Vec<File> {
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn find_by_id(&self, device_id: &DeviceId, id: FileId) -> AppResult<Option<File>> {
        Ok(self
            .devices
            .get(device_id)
            .and_then(|files| files.get(&id).cloned()))
    }

    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<File>> {
        let files = self
            .devices
            .get(device_id)
            .map(|files| files.values().cloned().collect())
            .unwrap_or_default();
        Ok(sorted_by_name(files))
    }

    async fn find_by_folder(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>> {
        let files = self
            .devices
            .get(device_id)
            .map(|files| {
                files
                    .values()
                    .filter(|f| f.folder_id == Some(folder_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(sorted_by_name(files))
    }

    async fn count_by_folder(
        &self,
        device_id: &DeviceId,
    ) -> AppResult<HashMap<Option<FolderId>, u64>> {
        let mut counts = HashMap::new();
        if let Some(files) = self.devices.get(device_id) {
            for file in files.values() {
                *counts.entry(file.folder_id).or_insert(0u64) += 1;
            }
        }
        Ok(counts)
    }

    async fn insert(&self, file: &File) -> AppResult<()> {
        let mut files = self.devices.entry(file.device_id.clone()).or_default();
        if files.contains_key(&file.id) {
            return Err(AppError::store_failure(format!(
                "File id {} already exists",
                file.id
            )));
        }
        files.insert(file.id, file.clone());
        Ok(())
    }

    async fn set_folder_path(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
        folder_path: &str,
    ) -> AppResult<u64> {
        let Some(mut files) = self.devices.get_mut(device_id) else {
            return Ok(0);
        };
        let mut updated = 0u64;
        for file in files.values_mut().filter(|f| f.folder_id == Some(folder_id)) {
            file.folder_path = folder_path.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    async fn move_files(
        &self,
        device_id: &DeviceId,
        ids: &[FileId],
        folder_id: Option<FolderId>,
        folder_path: &str,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let Some(mut files) = self.devices.get_mut(device_id) else {
            return Ok(0);
        };
        let mut updated = 0u64;
        for id in ids.iter().collect::<HashSet<_>>() {
            if let Some(file) = files.get_mut(id) {
                file.folder_id = folder_id;
                file.folder_path = folder_path.to_string();
                file.last_modified = at;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, device_id: &DeviceId, id: FileId) -> AppResult<bool> {
        Ok(self
            .devices
            .get_mut(device_id)
            .is_some_and(|mut files| files.remove(&id).is_some()))
    }

    async fn delete_in_folders(
        &self,
        device_id: &DeviceId,
        folder_ids: &[FolderId],
    ) -> AppResult<u64> {
        let Some(mut files) = self.devices.get_mut(device_id) else {
            return Ok(0);
        };
        let targets: HashSet<&FolderId> = folder_ids.iter().collect();
        let before = files.len();
        files.retain(|_, f| f.folder_id.as_ref().is_none_or(|id| !targets.contains(id)));
        Ok((before - files.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folderhub_entity::file::CreateFile;

    fn filed(device: &str, folder_id: FolderId, path: &str, name: &str) -> File {
        File::create(CreateFile {
            device_id: DeviceId::from(device),
            folder_id: Some(folder_id),
            folder_path: path.to_string(),
            name: name.to_string(),
            mime_type: None,
            size_bytes: 10,
        })
    }

    #[tokio::test]
    async fn test_set_folder_path_only_touches_that_folder() {
        let store = MemoryFileStore::new();
        let device = DeviceId::from("dev");
        let (docs, pics) = (FolderId::new(), FolderId::new());
        store.insert(&filed("dev", docs, "/Docs", "a.txt")).await.unwrap();
        store.insert(&filed("dev", pics, "/Pics", "b.png")).await.unwrap();

        let updated = store.set_folder_path(&device, docs, "/Papers").await.unwrap();
        assert_eq!(updated, 1);

        let all = store.find_all(&device).await.unwrap();
        assert_eq!(all[0].folder_path, "/Papers");
        assert_eq!(all[1].folder_path, "/Pics");
    }

    #[tokio::test]
    async fn test_move_files_ignores_unknown_ids() {
        let store = MemoryFileStore::new();
        let device = DeviceId::from("dev");
        let file = filed("dev", FolderId::new(), "/Docs", "a.txt");
        store.insert(&file).await.unwrap();

        let moved = store
            .move_files(&device, &[file.id, FileId::new()], None, "/", Utc::now())
            .await
            .unwrap();
        assert_eq!(moved, 1);

        let stored = store.find_by_id(&device, file.id).await.unwrap().unwrap();
        assert!(stored.is_unfiled());
        assert_eq!(stored.folder_path, "/");
    }

    #[tokio::test]
    async fn test_delete_in_folders_keeps_unfiled_and_others() {
        let store = MemoryFileStore::new();
        let device = DeviceId::from("dev");
        let (gone, kept) = (FolderId::new(), FolderId::new());
        store.insert(&filed("dev", gone, "/Gone", "x")).await.unwrap();
        store.insert(&filed("dev", kept, "/Kept", "y")).await.unwrap();
        store
            .insert(&File::create(CreateFile::unfiled(device.clone(), "z")))
            .await
            .unwrap();

        assert_eq!(store.delete_in_folders(&device, &[gone]).await.unwrap(), 1);
        let names: Vec<_> = store
            .find_all(&device)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["y", "z"]);
    }
}
