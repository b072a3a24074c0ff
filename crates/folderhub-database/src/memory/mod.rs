//! Process-local store backend.
//!
//! Used by tests and single-process development runs. Contents are lost
//! when the process exits.

pub mod file;
pub mod folder;

pub use file::MemoryFileStore;
pub use folder::MemoryFolderStore;
