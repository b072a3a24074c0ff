//! Folder hierarchy, path maintenance, and tree services.

pub mod paths;
pub mod service;
pub mod tree;

pub use paths::{PathMaintainer, PropagationStats, ResolvedPath};
pub use service::{CreateFolderRequest, FolderService, UpdateFolderRequest};
pub use tree::TreeService;
