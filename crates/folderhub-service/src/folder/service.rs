//! Hierarchy operations: create, rename/move, delete, and list folders.
//!
//! Every mutating operation returns the device's complete folder listing
//! so callers never reconcile partial updates. Validation runs before the
//! first write; store failures during propagation or cascading deletes
//! are surfaced as-is and the operation can simply be retried.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use folderhub_core::config::HierarchyConfig;
use folderhub_core::error::{AppError, ErrorKind};
use folderhub_core::result::AppResult;
use folderhub_core::types::FolderId;
use folderhub_database::store::{FileStore, FolderStore};
use folderhub_entity::folder::{CreateFolder, Folder};

use crate::context::DeviceContext;
use crate::folder::paths::PathMaintainer;

/// Request to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<FolderId>,
}

/// Request to rename and/or re-parent a folder.
#[derive(Debug, Clone, Default)]
pub struct UpdateFolderRequest {
    /// New name, if renaming.
    pub name: Option<String>,
    /// New parent, if moving. `Some(None)` moves the folder to the root.
    pub parent_id: Option<Option<FolderId>>,
}

/// Manages folder hierarchy operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
    /// Path computation and propagation.
    paths: Arc<PathMaintainer>,
    /// Depth and name limits.
    limits: HierarchyConfig,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        paths: Arc<PathMaintainer>,
        limits: HierarchyConfig,
    ) -> Self {
        Self {
            folders,
            files,
            paths,
            limits,
        }
    }

    /// Lists every folder of the device, unordered.
    pub async fn list_folders(&self, ctx: &DeviceContext) -> AppResult<Vec<Folder>> {
        self.folders.find_all(ctx.device()).await
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, ctx: &DeviceContext, folder_id: FolderId) -> AppResult<Folder> {
        self.folders
            .find_by_id(ctx.device(), folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Creates a new folder and returns the updated listing.
    pub async fn create_folder(
        &self,
        ctx: &DeviceContext,
        req: CreateFolderRequest,
    ) -> AppResult<Vec<Folder>> {
        let name = self.validate_name(&req.name)?;
        let resolved = self
            .paths
            .compute_path(ctx.device(), req.parent_id, &name)
            .await?;
        self.check_depth(resolved.depth)?;

        let folder = Folder::create(CreateFolder {
            device_id: ctx.device_id.clone(),
            parent_id: req.parent_id,
            name,
            path: resolved.path,
            depth: resolved.depth,
        });
        self.folders.insert(&folder).await?;

        info!(
            device_id = %ctx.device_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        self.list_folders(ctx).await
    }

    /// Renames and/or moves a folder and returns the updated listing.
    ///
    /// When neither the name nor the parent actually changes only
    /// `last_modified` is bumped; otherwise the folder's new path is
    /// computed and propagated through its subtree. The depth limit is
    /// checked against the whole subtree before the first write.
    pub async fn rename_or_move(
        &self,
        ctx: &DeviceContext,
        folder_id: FolderId,
        req: UpdateFolderRequest,
    ) -> AppResult<Vec<Folder>> {
        let device = ctx.device();
        let mut folder = self.get_folder(ctx, folder_id).await?;
        let old_parent_id = folder.parent_id;

        let new_name = match req.name {
            Some(raw) => Some(self.validate_name(&raw)?).filter(|name| *name != folder.name),
            None => None,
        };

        // Outer `Some` = the parent changes; inner = the resolved new parent.
        let new_parent = match req.parent_id {
            Some(target) if target != folder.parent_id => Some(match target {
                Some(parent_id) => Some(
                    self.paths
                        .validate_move(device, folder.id, parent_id)
                        .await?,
                ),
                None => None,
            }),
            _ => None,
        };

        let now = Utc::now();
        if new_name.is_none() && new_parent.is_none() {
            self.folders.touch(device, folder.id, now).await?;
            info!(device_id = %device, folder_id = %folder.id, "Folder unchanged; touched");
            return self.list_folders(ctx).await;
        }

        let old_path = folder.path.clone();
        let old_depth = folder.depth;
        if let Some(name) = new_name {
            folder.name = name;
        }
        if let Some(parent) = new_parent {
            folder.parent_id = parent.map(|p| p.id);
        }

        let resolved = match self
            .paths
            .compute_path(device, folder.parent_id, &folder.name)
            .await
        {
            // An orphan whose parent record is gone is re-rooted.
            Err(err) if err.is(ErrorKind::NotFound) && folder.parent_id == old_parent_id => {
                folder.parent_id = None;
                self.paths.compute_path(device, None, &folder.name).await?
            }
            other => other?,
        };

        let subtree = self.paths.collect_subtree(device, folder.id).await?;
        let height = subtree
            .iter()
            .map(|f| f.depth - old_depth)
            .max()
            .unwrap_or(0);
        self.check_depth(resolved.depth + height)?;

        folder.path = resolved.path;
        folder.depth = resolved.depth;
        folder.last_modified = now;

        self.folders.update(&folder).await?;
        let stats = self
            .paths
            .propagate_path_change(device, folder.id, folder.path.clone(), folder.depth)
            .await?;

        info!(
            device_id = %device,
            folder_id = %folder.id,
            old_path = %old_path,
            new_path = %folder.path,
            folders_updated = stats.folders,
            files_updated = stats.files,
            "Folder renamed/moved"
        );

        self.list_folders(ctx).await
    }

    /// Deletes a folder, every descendant folder, and every file filed
    /// anywhere in that subtree. Returns the updated listing.
    pub async fn delete_folder(
        &self,
        ctx: &DeviceContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let device = ctx.device();
        let subtree = self.paths.collect_subtree(device, folder_id).await?;
        let ids: Vec<FolderId> = subtree.iter().map(|f| f.id).collect();

        let files_deleted = self.files.delete_in_folders(device, &ids).await?;
        let folders_deleted = self.folders.delete_many(device, &ids).await?;

        info!(
            device_id = %device,
            folder_id = %folder_id,
            path = %subtree[0].path,
            folders_deleted,
            files_deleted,
            "Folder deleted"
        );

        self.list_folders(ctx).await
    }

    /// Trim and check a folder name.
    fn validate_name(&self, raw: &str) -> AppResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Folder name cannot be empty"));
        }
        if name.contains('/') {
            return Err(AppError::invalid_input("Folder name cannot contain '/'"));
        }
        if name.chars().count() > self.limits.max_name_length {
            return Err(AppError::invalid_input(format!(
                "Folder name exceeds {} characters",
                self.limits.max_name_length
            )));
        }
        Ok(name.to_string())
    }

    /// Reject folders that would sit at or below the depth limit.
    fn check_depth(&self, depth: i32) -> AppResult<()> {
        if depth < 0 || depth as u32 >= self.limits.max_depth {
            return Err(AppError::invalid_input(format!(
                "Folders cannot be nested more than {} levels deep",
                self.limits.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use folderhub_core::types::{DeviceId, ROOT_PATH};
    use folderhub_database::memory::{MemoryFileStore, MemoryFolderStore};
    use folderhub_entity::file::{CreateFile, File};

    struct Harness {
        ctx: DeviceContext,
        files: Arc<MemoryFileStore>,
        service: FolderService,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_stores(Arc::new(MemoryFolderStore::new()), HierarchyConfig::default())
        }

        fn with_stores(folders: Arc<dyn FolderStore>, limits: HierarchyConfig) -> Self {
            let files = Arc::new(MemoryFileStore::new());
            let paths = Arc::new(PathMaintainer::new(
                folders.clone(),
                files.clone(),
                limits.max_depth,
            ));
            let service = FolderService::new(folders.clone(), files.clone(), paths, limits);
            Self {
                ctx: DeviceContext::new("device-1"),
                files,
                service,
            }
        }

        async fn create(&self, name: &str, parent: Option<&Folder>) -> Folder {
            let listing = self
                .service
                .create_folder(
                    &self.ctx,
                    CreateFolderRequest {
                        name: name.to_string(),
                        parent_id: parent.map(|p| p.id),
                    },
                )
                .await
                .unwrap();
            let parent_id = parent.map(|p| p.id);
            listing
                .into_iter()
                .find(|f| f.name == name.trim() && f.parent_id == parent_id)
                .unwrap()
        }

        async fn file_in(&self, folder: &Folder, name: &str) -> File {
            let file = File::create(CreateFile {
                device_id: self.ctx.device_id.clone(),
                folder_id: Some(folder.id),
                folder_path: folder.path.clone(),
                name: name.to_string(),
                mime_type: Some("application/pdf".into()),
                size_bytes: 42,
            });
            self.files.insert(&file).await.unwrap();
            file
        }

        async fn reload(&self, folder: &Folder) -> Folder {
            self.service.get_folder(&self.ctx, folder.id).await.unwrap()
        }

        async fn reload_file(&self, file: &File) -> File {
            self.files
                .find_by_id(self.ctx.device(), file.id)
                .await
                .unwrap()
                .unwrap()
        }

        async fn rename(&self, folder: &Folder, name: &str) -> AppResult<Vec<Folder>> {
            self.service
                .rename_or_move(
                    &self.ctx,
                    folder.id,
                    UpdateFolderRequest {
                        name: Some(name.to_string()),
                        parent_id: None,
                    },
                )
                .await
        }

        async fn move_to(&self, folder: &Folder, parent: Option<&Folder>) -> AppResult<Vec<Folder>> {
            self.service
                .rename_or_move(
                    &self.ctx,
                    folder.id,
                    UpdateFolderRequest {
                        name: None,
                        parent_id: Some(parent.map(|p| p.id)),
                    },
                )
                .await
        }

        /// Every folder's path matches its parent's path plus its name,
        /// and every filed file mirrors its folder's path.
        async fn assert_paths_consistent(&self) {
            let folders = self.service.list_folders(&self.ctx).await.unwrap();
            for folder in &folders {
                let parent_path = folder.parent_id.map(|pid| {
                    folders
                        .iter()
                        .find(|p| p.id == pid)
                        .map(|p| p.path.clone())
                        .unwrap()
                });
                let expected = format!("{}/{}", parent_path.unwrap_or_default(), folder.name);
                assert_eq!(folder.path, expected, "stale path on {:?}", folder.name);
            }
            for file in self.files.find_all(self.ctx.device()).await.unwrap() {
                match file.folder_id {
                    Some(fid) => {
                        let owner = folders.iter().find(|f| f.id == fid).unwrap();
                        assert_eq!(file.folder_path, owner.path);
                    }
                    None => assert_eq!(file.folder_path, ROOT_PATH),
                }
            }
        }
    }

    #[tokio::test]
    async fn test_create_root_and_child() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;

        assert_eq!(docs.path, "/Docs");
        assert_eq!(docs.depth, 0);
        assert_eq!(year.path, "/Docs/2024");
        assert_eq!(year.depth, 1);
        assert_eq!(year.parent_id, Some(docs.id));
    }

    #[tokio::test]
    async fn test_create_returns_full_listing() {
        let h = Harness::new();
        h.create("A", None).await;
        h.create("B", None).await;
        let listing = h
            .service
            .create_folder(
                &h.ctx,
                CreateFolderRequest {
                    name: "C".into(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(listing.len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_slashed_names() {
        let h = Harness::new();
        for bad in ["", "   ", "a/b"] {
            let err = h
                .service
                .create_folder(
                    &h.ctx,
                    CreateFolderRequest {
                        name: bad.into(),
                        parent_id: None,
                    },
                )
                .await
                .unwrap_err();
            assert!(err.is(ErrorKind::InvalidInput), "{bad:?} accepted");
        }
        assert!(h.service.list_folders(&h.ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let h = Harness::new();
        let docs = h.create("  Docs ", None).await;
        assert_eq!(docs.name, "Docs");
        assert_eq!(docs.path, "/Docs");
    }

    #[tokio::test]
    async fn test_sibling_names_may_repeat() {
        let h = Harness::new();
        let a = h.create("Same", None).await;
        let listing = h
            .service
            .create_folder(
                &h.ctx,
                CreateFolderRequest {
                    name: "Same".into(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().all(|f| f.path == "/Same"));
        assert!(listing.iter().any(|f| f.id != a.id));
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_creates_nothing() {
        let h = Harness::new();
        let err = h
            .service
            .create_folder(
                &h.ctx,
                CreateFolderRequest {
                    name: "Reports".into(),
                    parent_id: Some(FolderId::new()),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert!(h.service.list_folders(&h.ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_respects_depth_limit() {
        let limits = HierarchyConfig {
            max_depth: 2,
            ..HierarchyConfig::default()
        };
        let h = Harness::with_stores(Arc::new(MemoryFolderStore::new()), limits);
        let a = h.create("a", None).await;
        let b = h.create("b", Some(&a)).await;

        let err = h
            .service
            .create_folder(
                &h.ctx,
                CreateFolderRequest {
                    name: "c".into(),
                    parent_id: Some(b.id),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn test_rename_root_propagates_to_children_and_files() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let file = h.file_in(&year, "taxes.pdf").await;

        h.rename(&docs, "Papers").await.unwrap();

        assert_eq!(h.reload(&docs).await.path, "/Papers");
        assert_eq!(h.reload(&year).await.path, "/Papers/2024");
        assert_eq!(h.reload_file(&file).await.folder_path, "/Papers/2024");
        h.assert_paths_consistent().await;
    }

    #[tokio::test]
    async fn test_rename_to_same_name_only_touches() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;

        h.rename(&docs, " Docs ").await.unwrap();

        let reloaded = h.reload(&docs).await;
        assert_eq!(reloaded.path, "/Docs");
        assert!(reloaded.last_modified >= docs.last_modified);
        assert_eq!(h.reload(&year).await, year);
    }

    #[tokio::test]
    async fn test_rename_missing_folder() {
        let h = Harness::new();
        let err = h
            .service
            .rename_or_move(&h.ctx, FolderId::new(), UpdateFolderRequest::default())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_rename_rejects_blank_name_without_writing() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let err = h.rename(&docs, "  ").await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidInput));
        assert_eq!(h.reload(&docs).await, docs);
    }

    #[tokio::test]
    async fn test_move_subtree_under_new_parent() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let month = h.create("01", Some(&year)).await;
        let archive = h.create("Archive", None).await;
        let file = h.file_in(&month, "jan.pdf").await;

        h.move_to(&year, Some(&archive)).await.unwrap();

        let moved = h.reload(&year).await;
        assert_eq!(moved.parent_id, Some(archive.id));
        assert_eq!(moved.path, "/Archive/2024");
        assert_eq!(moved.depth, 1);
        let month = h.reload(&month).await;
        assert_eq!(month.path, "/Archive/2024/01");
        assert_eq!(month.depth, 2);
        assert_eq!(h.reload_file(&file).await.folder_path, "/Archive/2024/01");
        h.assert_paths_consistent().await;
    }

    #[tokio::test]
    async fn test_move_to_root() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;

        h.move_to(&year, None).await.unwrap();

        let moved = h.reload(&year).await;
        assert!(moved.is_root());
        assert_eq!(moved.path, "/2024");
        assert_eq!(moved.depth, 0);
    }

    #[tokio::test]
    async fn test_rename_and_move_together() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let archive = h.create("Archive", None).await;

        h.service
            .rename_or_move(
                &h.ctx,
                year.id,
                UpdateFolderRequest {
                    name: Some("Old".into()),
                    parent_id: Some(Some(archive.id)),
                },
            )
            .await
            .unwrap();

        assert_eq!(h.reload(&year).await.path, "/Archive/Old");
    }

    #[tokio::test]
    async fn test_move_into_self_or_descendant_is_rejected() {
        let h = Harness::new();
        let a = h.create("A", None).await;
        let b = h.create("B", Some(&a)).await;
        let c = h.create("C", Some(&b)).await;

        for target in [&a, &b, &c] {
            let err = h.move_to(&a, Some(target)).await.unwrap_err();
            assert!(err.is(ErrorKind::InvalidMove));
        }
        assert_eq!(h.reload(&a).await, a);
        h.assert_paths_consistent().await;
    }

    #[tokio::test]
    async fn test_rejected_move_does_not_apply_rename() {
        let h = Harness::new();
        let a = h.create("A", None).await;
        let b = h.create("B", Some(&a)).await;

        let err = h
            .service
            .rename_or_move(
                &h.ctx,
                a.id,
                UpdateFolderRequest {
                    name: Some("Renamed".into()),
                    parent_id: Some(Some(b.id)),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidMove));
        assert_eq!(h.reload(&a).await.name, "A");
    }

    #[tokio::test]
    async fn test_move_respects_depth_limit() {
        let limits = HierarchyConfig {
            max_depth: 3,
            ..HierarchyConfig::default()
        };
        let h = Harness::with_stores(Arc::new(MemoryFolderStore::new()), limits);
        let a = h.create("a", None).await;
        let b = h.create("b", Some(&a)).await;
        let x = h.create("x", None).await;
        h.create("y", Some(&x)).await;

        // x/y would land at depths 2 and 3 under b.
        let err = h.move_to(&x, Some(&b)).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidInput));
        assert!(h.reload(&x).await.is_root());

        // Under a they land at depths 1 and 2, which fits.
        h.move_to(&x, Some(&a)).await.unwrap();
        h.assert_paths_consistent().await;
    }

    #[tokio::test]
    async fn test_rename_checks_subtree_depth_before_writing() {
        let store = Arc::new(MemoryFolderStore::new());
        let roomy = Harness::with_stores(store.clone(), HierarchyConfig::default());
        let a = roomy.create("a", None).await;
        let b = roomy.create("b", Some(&a)).await;
        let c = roomy.create("c", Some(&b)).await;
        let d = roomy.create("d", Some(&c)).await;

        // Same tree served under a tighter limit than it was built with.
        let tight = Harness::with_stores(
            store,
            HierarchyConfig {
                max_depth: 2,
                ..HierarchyConfig::default()
            },
        );
        let err = tight.rename(&a, "Z").await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidInput));

        for folder in [&a, &b, &c, &d] {
            assert_eq!(roomy.reload(folder).await, *folder);
        }
    }

    #[tokio::test]
    async fn test_rename_orphan_moves_it_to_root() {
        let store = Arc::new(MemoryFolderStore::new());
        let h = Harness::with_stores(store.clone(), HierarchyConfig::default());
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let month = h.create("01", Some(&year)).await;
        store.delete_many(h.ctx.device(), &[docs.id]).await.unwrap();

        h.rename(&year, "Y2024").await.unwrap();

        let renamed = h.reload(&year).await;
        assert!(renamed.is_root());
        assert_eq!(renamed.path, "/Y2024");
        assert_eq!(renamed.depth, 0);
        let month = h.reload(&month).await;
        assert_eq!(month.path, "/Y2024/01");
        assert_eq!(month.depth, 1);
        h.assert_paths_consistent().await;
    }

    #[tokio::test]
    async fn test_move_orphan_to_missing_parent_still_fails() {
        let store = Arc::new(MemoryFolderStore::new());
        let h = Harness::with_stores(store.clone(), HierarchyConfig::default());
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        store.delete_many(h.ctx.device(), &[docs.id]).await.unwrap();

        let err = h
            .service
            .rename_or_move(
                &h.ctx,
                year.id,
                UpdateFolderRequest {
                    name: None,
                    parent_id: Some(Some(FolderId::new())),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(h.reload(&year).await, year);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_subtree_only() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let month = h.create("01", Some(&year)).await;
        let pics = h.create("Pics", None).await;
        h.file_in(&docs, "a.txt").await;
        h.file_in(&month, "b.txt").await;
        let kept = h.file_in(&pics, "c.png").await;
        let unfiled = File::create(CreateFile::unfiled(h.ctx.device_id.clone(), "d.txt"));
        h.files.insert(&unfiled).await.unwrap();

        let listing = h.service.delete_folder(&h.ctx, docs.id).await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, pics.id);
        let remaining: Vec<_> = h
            .files
            .find_all(h.ctx.device())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.contains(&kept.id));
        assert!(remaining.contains(&unfiled.id));
        assert!(
            h.service
                .get_folder(&h.ctx, year.id)
                .await
                .unwrap_err()
                .is(ErrorKind::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_missing_folder() {
        let h = Harness::new();
        let err = h
            .service
            .delete_folder(&h.ctx, FolderId::new())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_devices_do_not_see_each_other() {
        let h = Harness::new();
        let docs = h.create("Docs", None).await;
        let other = DeviceContext::new("device-2");

        assert!(h.service.list_folders(&other).await.unwrap().is_empty());
        let err = h.service.delete_folder(&other, docs.id).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        let err = h
            .service
            .create_folder(
                &other,
                CreateFolderRequest {
                    name: "Mine".into(),
                    parent_id: Some(docs.id),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_random_sequence_keeps_paths_consistent() {
        let h = Harness::new();
        let a = h.create("A", None).await;
        let b = h.create("B", Some(&a)).await;
        let c = h.create("C", Some(&b)).await;
        let d = h.create("D", None).await;
        h.file_in(&c, "1").await;
        h.file_in(&b, "2").await;

        h.rename(&a, "Alpha").await.unwrap();
        h.move_to(&b, Some(&d)).await.unwrap();
        h.rename(&c, "Gamma").await.unwrap();
        h.move_to(&d, Some(&a)).await.unwrap();
        assert!(h.move_to(&a, Some(&c)).await.is_err());
        h.move_to(&c, None).await.unwrap();

        h.assert_paths_consistent().await;
    }

    /// Folder store whose `set_path` starts failing after a number of calls.
    #[derive(Debug)]
    struct FlakyFolderStore {
        inner: MemoryFolderStore,
        allowed_set_paths: AtomicUsize,
    }

    #[async_trait]
    impl FolderStore for FlakyFolderStore {
        async fn find_by_id(&self, d: &DeviceId, id: FolderId) -> AppResult<Option<Folder>> {
            self.inner.find_by_id(d, id).await
        }
        async fn find_children(&self, d: &DeviceId, id: FolderId) -> AppResult<Vec<Folder>> {
            self.inner.find_children(d, id).await
        }
        async fn find_all(&self, d: &DeviceId) -> AppResult<Vec<Folder>> {
            self.inner.find_all(d).await
        }
        async fn insert(&self, folder: &Folder) -> AppResult<()> {
            self.inner.insert(folder).await
        }
        async fn update(&self, folder: &Folder) -> AppResult<()> {
            self.inner.update(folder).await
        }
        async fn set_path(
            &self,
            d: &DeviceId,
            id: FolderId,
            path: &str,
            depth: i32,
        ) -> AppResult<bool> {
            let left = self.allowed_set_paths.load(Ordering::SeqCst);
            if left == 0 {
                return Err(AppError::store_failure("connection reset"));
            }
            self.allowed_set_paths.store(left - 1, Ordering::SeqCst);
            self.inner.set_path(d, id, path, depth).await
        }
        async fn touch(&self, d: &DeviceId, id: FolderId, at: DateTime<Utc>) -> AppResult<bool> {
            self.inner.touch(d, id, at).await
        }
        async fn delete_many(&self, d: &DeviceId, ids: &[FolderId]) -> AppResult<u64> {
            self.inner.delete_many(d, ids).await
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_failed_propagation_converges_on_retry() {
        let flaky = Arc::new(FlakyFolderStore {
            inner: MemoryFolderStore::new(),
            allowed_set_paths: AtomicUsize::new(usize::MAX),
        });
        let h = Harness::with_stores(flaky.clone(), HierarchyConfig::default());
        let docs = h.create("Docs", None).await;
        let year = h.create("2024", Some(&docs)).await;
        let month = h.create("01", Some(&year)).await;

        // Root and first child get rewritten, then the store fails.
        flaky.allowed_set_paths.store(2, Ordering::SeqCst);
        let err = h.rename(&docs, "Papers").await.unwrap_err();
        assert!(err.is(ErrorKind::StoreFailure));
        assert_eq!(h.reload(&docs).await.path, "/Papers");
        assert_eq!(h.reload(&year).await.path, "/Papers/2024");
        assert_eq!(h.reload(&month).await.path, "/Docs/2024/01");

        // Retrying the same rename is a no-op since the folder itself already
        // carries the new name; the next structural change repairs the subtree.
        flaky.allowed_set_paths.store(usize::MAX, Ordering::SeqCst);
        h.rename(&docs, "Tmp").await.unwrap();
        h.rename(&docs, "Papers").await.unwrap();
        assert_eq!(h.reload(&month).await.path, "/Papers/2024/01");
        h.assert_paths_consistent().await;
    }
}
