//! Backend selection.

use std::sync::Arc;

use tracing::info;

use folderhub_core::config::{AppConfig, StoreBackend};
use folderhub_core::error::AppError;

use crate::connection::DatabasePool;
use crate::memory::{MemoryFileStore, MemoryFolderStore};
use crate::migration::run_migrations;
use crate::repositories::{FileRepository, FolderRepository};
use crate::store::{FileStore, FolderStore};

/// The pair of stores the hierarchy engine runs against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Folder records.
    pub folders: Arc<dyn FolderStore>,
    /// File records.
    pub files: Arc<dyn FileStore>,
    /// Connection pool, when running on PostgreSQL.
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the backend selected by `store.backend`.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        info!(backend = %config.store.backend, "Initializing stores");

        match config.store.backend {
            StoreBackend::Memory => Ok(Self::memory()),
            StoreBackend::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    folders: Arc::new(FolderRepository::new(pool.pool().clone())),
                    files: Arc::new(FileRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            folders: Arc::new(MemoryFolderStore::new()),
            files: Arc::new(MemoryFileStore::new()),
            pool: None,
        }
    }

    /// Name of the active backend, for health reporting.
    pub fn backend(&self) -> StoreBackend {
        if self.pool.is_some() {
            StoreBackend::Postgres
        } else {
            StoreBackend::Memory
        }
    }

    /// Whether the backing store answers.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        self.folders.health_check().await
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
