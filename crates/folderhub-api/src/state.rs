//! Application state shared across all handlers.

use std::sync::Arc;

use folderhub_core::config::AppConfig;
use folderhub_database::Stores;
use folderhub_service::file::FileService;
use folderhub_service::folder::{FolderService, PathMaintainer, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Folder and file stores
    pub stores: Stores,
    /// Folder hierarchy operations
    pub folder_service: Arc<FolderService>,
    /// Tree and breadcrumb views
    pub tree_service: Arc<TreeService>,
    /// File registration and filing
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wires the services on top of an opened set of stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let paths = Arc::new(PathMaintainer::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
            config.hierarchy.max_depth,
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
            paths,
            config.hierarchy.clone(),
        ));
        let tree_service = Arc::new(TreeService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.folders),
        ));

        Self {
            config: Arc::new(config),
            stores,
            folder_service,
            tree_service,
            file_service,
        }
    }
}
