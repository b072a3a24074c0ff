//! PostgreSQL folder repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use folderhub_core::error::{AppError, ErrorKind};
use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FolderId};
use folderhub_entity::folder::Folder;

use super::db_error;
use crate::connection::ping;
use crate::store::FolderStore;

/// Repository for folder records.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, device_id: &DeviceId, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE device_id = $1 AND id = $2")
            .bind(device_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find folder"))
    }

    async fn find_children(
        &self,
        device_id: &DeviceId,
        parent_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE device_id = $1 AND parent_id = $2 ORDER BY name ASC",
        )
        .bind(device_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list child folders"))
    }

    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE device_id = $1")
            .bind(device_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list folders"))
    }

    async fn insert(&self, folder: &Folder) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO folders \
             (device_id, id, parent_id, name, path, depth, created_at, last_modified) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&folder.device_id)
        .bind(folder.id)
        .bind(folder.parent_id)
        .bind(&folder.name)
        .bind(&folder.path)
        .bind(folder.depth)
        .bind(folder.created_at)
        .bind(folder.last_modified)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("folders_pkey") => {
                AppError::with_source(
                    ErrorKind::StoreFailure,
                    format!("Folder id {} already exists", folder.id),
                    e,
                )
            }
            _ => AppError::with_source(ErrorKind::StoreFailure, "Failed to create folder", e),
        })?;
        Ok(())
    }

    async fn update(&self, folder: &Folder) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE folders SET name = $3, parent_id = $4, path = $5, depth = $6, \
             last_modified = $7 WHERE device_id = $1 AND id = $2",
        )
        .bind(&folder.device_id)
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.path)
        .bind(folder.depth)
        .bind(folder.last_modified)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update folder"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Folder {} not found", folder.id)));
        }
        Ok(())
    }

    async fn set_path(
        &self,
        device_id: &DeviceId,
        id: FolderId,
        path: &str,
        depth: i32,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE folders SET path = $3, depth = $4 WHERE device_id = $1 AND id = $2",
        )
        .bind(device_id)
        .bind(id)
        .bind(path)
        .bind(depth)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update folder path"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn touch(
        &self,
        device_id: &DeviceId,
        id: FolderId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE folders SET last_modified = $3 WHERE device_id = $1 AND id = $2")
                .bind(device_id)
                .bind(id)
                .bind(at)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to touch folder"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, device_id: &DeviceId, ids: &[FolderId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM folders WHERE device_id = $1 AND id = ANY($2)")
            .bind(device_id)
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete folders"))?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }
}
