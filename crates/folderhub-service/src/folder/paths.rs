//! Materialized path maintenance.
//!
//! The [`PathMaintainer`] is the only writer of a folder's `path` and
//! `depth`, and, together with explicit file moves, of a file's
//! `folder_path`. It computes paths from the parent, propagates changes
//! down a subtree, and validates moves against cycles.

use std::collections::{HashSet, VecDeque};
use std::ops::AddAssign;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FolderId};
use folderhub_database::store::{FileStore, FolderStore};
use folderhub_entity::folder::Folder;
use folderhub_entity::folder::model::join_path;

/// Path and depth a folder should have given its parent and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Materialized path.
    pub path: String,
    /// Depth in the tree (0 for root).
    pub depth: i32,
}

/// Records touched by one propagation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Folders whose path was rewritten, including the starting folder.
    pub folders: u64,
    /// Files whose `folder_path` was rewritten.
    pub files: u64,
}

impl AddAssign for PropagationStats {
    fn add_assign(&mut self, rhs: Self) {
        self.folders += rhs.folders;
        self.files += rhs.files;
    }
}

/// Computes, propagates, and validates materialized folder paths.
#[derive(Debug, Clone)]
pub struct PathMaintainer {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    /// Any chain longer than this can only come from a corrupted tree.
    max_depth: u32,
}

impl PathMaintainer {
    /// Creates a new path maintainer.
    pub fn new(folders: Arc<dyn FolderStore>, files: Arc<dyn FileStore>, max_depth: u32) -> Self {
        Self {
            folders,
            files,
            max_depth,
        }
    }

    /// Path for a folder named `name` under `parent_id`.
    ///
    /// Fails with `NotFound` when the parent does not exist for the device.
    pub async fn compute_path(
        &self,
        device_id: &DeviceId,
        parent_id: Option<FolderId>,
        name: &str,
    ) -> AppResult<ResolvedPath> {
        let Some(parent_id) = parent_id else {
            return Ok(ResolvedPath {
                path: join_path(None, name),
                depth: 0,
            });
        };

        let parent = self
            .folders
            .find_by_id(device_id, parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Parent folder {parent_id} not found")))?;

        Ok(ResolvedPath {
            path: parent.child_path(name),
            depth: parent.depth + 1,
        })
    }

    /// Rewrite `folder_id`'s path to `new_path`, then every descendant's,
    /// then the `folder_path` of files filed under each.
    ///
    /// Depth-first pre-order: a folder's path is written before its
    /// children are visited, and one store call is awaited at a time.
    /// Writes already made stay in place if a later one fails; running
    /// the same propagation again converges to the same state.
    pub fn propagate_path_change<'a>(
        &'a self,
        device_id: &'a DeviceId,
        folder_id: FolderId,
        new_path: String,
        depth: i32,
    ) -> BoxFuture<'a, AppResult<PropagationStats>> {
        async move {
            if depth < 0 || depth as u32 >= self.max_depth {
                return Err(AppError::internal(format!(
                    "Folder {folder_id} sits deeper than {} levels; the hierarchy may contain a cycle",
                    self.max_depth
                )));
            }

            self.folders
                .set_path(device_id, folder_id, &new_path, depth)
                .await?;
            debug!(
                device_id = %device_id,
                folder_id = %folder_id,
                path = %new_path,
                "Folder path rewritten"
            );

            let mut stats = PropagationStats {
                folders: 1,
                files: 0,
            };

            for child in self.folders.find_children(device_id, folder_id).await? {
                let child_path = join_path(Some(&new_path), &child.name);
                stats += self
                    .propagate_path_change(device_id, child.id, child_path, depth + 1)
                    .await?;
            }

            stats.files += self
                .files
                .set_folder_path(device_id, folder_id, &new_path)
                .await?;

            Ok(stats)
        }
        .boxed()
    }

    /// Check that `folder_id` may be re-parented under `new_parent_id`.
    ///
    /// Fails with `InvalidMove` for self-parenting or when the new parent
    /// is a descendant of the folder, and with `NotFound` when the new
    /// parent does not exist. Returns the new parent on success.
    pub async fn validate_move(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
        new_parent_id: FolderId,
    ) -> AppResult<Folder> {
        if new_parent_id == folder_id {
            warn!(device_id = %device_id, folder_id = %folder_id, "Rejected move into itself");
            return Err(AppError::invalid_move("Cannot move a folder into itself"));
        }

        let parent = self
            .folders
            .find_by_id(device_id, new_parent_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Target parent folder {new_parent_id} not found"))
            })?;

        let mut seen = HashSet::from([parent.id]);
        let mut cursor = parent.parent_id;
        while let Some(ancestor_id) = cursor {
            if ancestor_id == folder_id {
                warn!(
                    device_id = %device_id,
                    folder_id = %folder_id,
                    new_parent_id = %new_parent_id,
                    "Rejected move into a descendant"
                );
                return Err(AppError::invalid_move(
                    "Cannot move a folder into one of its descendants",
                ));
            }
            if !seen.insert(ancestor_id) {
                return Err(AppError::internal(format!(
                    "Ancestor chain of folder {new_parent_id} loops back on itself"
                )));
            }
            // A dangling parent link ends the chain like a root would.
            cursor = self
                .folders
                .find_by_id(device_id, ancestor_id)
                .await?
                .and_then(|ancestor| ancestor.parent_id);
        }

        Ok(parent)
    }

    /// The folder and all of its descendants, breadth-first.
    ///
    /// Fails with `NotFound` when the folder does not exist.
    pub async fn collect_subtree(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let root = self
            .folders
            .find_by_id(device_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut seen = HashSet::from([root.id]);
        let mut queue = VecDeque::from([root.id]);
        let mut subtree = vec![root];

        while let Some(id) = queue.pop_front() {
            for child in self.folders.find_children(device_id, id).await? {
                if seen.insert(child.id) {
                    queue.push_back(child.id);
                    subtree.push(child);
                }
            }
        }

        Ok(subtree)
    }
}
