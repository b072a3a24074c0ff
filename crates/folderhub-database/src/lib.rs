//! # folderhub-database
//!
//! Persistence for folder and file records. The [`store`] traits are the
//! contract the hierarchy engine is written against; [`repositories`]
//! implements them on PostgreSQL and [`memory`] on process-local maps.
//! Every query is scoped by device key.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use backend::Stores;
pub use connection::DatabasePool;
pub use store::{FileStore, FolderStore};
