//! # folderhub-service
//!
//! The folder-hierarchy maintenance engine. Services are stateless between
//! calls apart from the records they persist, and every operation is scoped
//! to the device in its [`DeviceContext`].
//!
//! Services follow constructor injection: stores are provided at
//! construction time as `Arc<dyn ...>` trait objects.

pub mod context;
pub mod file;
pub mod folder;

pub use context::DeviceContext;
pub use file::FileService;
pub use folder::{FolderService, PathMaintainer, TreeService};
