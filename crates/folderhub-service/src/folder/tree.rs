//! Folder tree building and breadcrumbs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::FolderId;
use folderhub_database::store::{FileStore, FolderStore};
use folderhub_entity::folder::{Folder, FolderNode, FolderTree};

use crate::context::DeviceContext;

/// Builds nested views of a device's folders.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folders: Arc<dyn FolderStore>, files: Arc<dyn FileStore>) -> Self {
        Self { folders, files }
    }

    /// Builds the device's whole forest. Roots and siblings are ordered by name.
    ///
    /// A folder whose parent no longer exists is shown as a root.
    pub async fn get_tree(&self, ctx: &DeviceContext) -> AppResult<FolderTree> {
        let device = ctx.device();
        let all = self.folders.find_all(device).await?;
        let file_counts = self.files.count_by_folder(device).await?;

        let mut tree = FolderTree::empty();
        tree.total_folders = all.len() as u64;
        tree.unfiled_files = file_counts.get(&None).copied().unwrap_or(0);
        if all.is_empty() {
            return Ok(tree);
        }

        let known: HashSet<FolderId> = all.iter().map(|f| f.id).collect();
        let mut children: HashMap<Option<FolderId>, Vec<Folder>> = HashMap::new();
        for folder in all {
            let key = folder.parent_id.filter(|pid| known.contains(pid));
            children.entry(key).or_default().push(folder);
        }
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        let roots = children.remove(&None).unwrap_or_default();
        tree.roots = roots
            .into_iter()
            .map(|root| Self::build_node(root, &mut children, &file_counts))
            .collect();
        Ok(tree)
    }

    /// Builds one node and, recursively, its children.
    fn build_node(
        folder: Folder,
        children: &mut HashMap<Option<FolderId>, Vec<Folder>>,
        file_counts: &HashMap<Option<FolderId>, u64>,
    ) -> FolderNode {
        let nodes: Vec<FolderNode> = children
            .remove(&Some(folder.id))
            .unwrap_or_default()
            .into_iter()
            .map(|child| Self::build_node(child, children, file_counts))
            .collect();

        FolderNode {
            id: folder.id,
            name: folder.name,
            path: folder.path,
            depth: folder.depth,
            child_count: nodes.len() as u64,
            file_count: file_counts.get(&Some(folder.id)).copied().unwrap_or(0),
            children: nodes,
        }
    }

    /// The chain of folders from the root down to `folder_id`, inclusive.
    pub async fn get_breadcrumbs(
        &self,
        ctx: &DeviceContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let device = ctx.device();
        let folder = self
            .folders
            .find_by_id(device, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut seen = HashSet::from([folder.id]);
        let mut cursor = folder.parent_id;
        let mut trail = vec![folder];

        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                return Err(AppError::internal(format!(
                    "Ancestor chain of folder {folder_id} loops back on itself"
                )));
            }
            match self.folders.find_by_id(device, parent_id).await? {
                Some(parent) => {
                    cursor = parent.parent_id;
                    trail.push(parent);
                }
                None => break,
            }
        }

        trail.reverse();
        Ok(trail)
    }
}
