//! # folderhub-core
//!
//! Core crate for FolderHub. Contains configuration schemas, typed
//! identifiers, and the unified error system shared by the hierarchy
//! engine, the store backends, and the HTTP layer.
//!
//! This crate has **no** internal dependencies on other FolderHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
