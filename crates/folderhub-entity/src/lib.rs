//! # folderhub-entity
//!
//! Domain entity models for FolderHub. Every struct in this crate is
//! either a stored record (`Folder`, `File`, deriving `sqlx::FromRow`)
//! or a value object derived from them for display.

pub mod file;
pub mod folder;
