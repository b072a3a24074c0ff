//! Core type definitions used across the FolderHub workspace.

pub mod id;

pub use id::*;

/// Marker stored in a file's `folder_path` when the file is not filed
/// under any folder.
pub const ROOT_PATH: &str = "/";
