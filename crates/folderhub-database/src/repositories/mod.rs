//! PostgreSQL implementations of the store traits.

use folderhub_core::error::{AppError, ErrorKind};

pub mod file;
pub mod folder;

pub use file::FileRepository;
pub use folder::FolderRepository;

/// Map a driver error to a `StoreFailure` carrying `message`.
pub(crate) fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::StoreFailure, message, e)
}
