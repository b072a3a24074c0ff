//! PostgreSQL file repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use folderhub_core::result::AppResult;
use folderhub_core::types::{DeviceId, FileId, FolderId};
use folderhub_entity::file::File;

use super::db_error;
use crate::store::FileStore;

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, device_id: &DeviceId, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE device_id = $1 AND id = $2")
            .bind(device_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find file"))
    }

    async fn find_all(&self, device_id: &DeviceId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE device_id = $1 ORDER BY name ASC")
            .bind(device_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list files"))
    }

    async fn find_by_folder(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE device_id = $1 AND folder_id = $2 ORDER BY name ASC",
        )
        .bind(device_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list files in folder"))
    }

    async fn count_by_folder(
        &self,
        device_id: &DeviceId,
    ) -> AppResult<HashMap<Option<FolderId>, u64>> {
        let rows: Vec<(Option<FolderId>, i64)> = sqlx::query_as(
            "SELECT folder_id, COUNT(*) FROM files WHERE device_id = $1 GROUP BY folder_id",
        )
        .bind(device_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count files"))?;

        Ok(rows
            .into_iter()
            .map(|(folder_id, count)| (folder_id, count as u64))
            .collect())
    }

    async fn insert(&self, file: &File) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO files \
             (device_id, id, folder_id, folder_path, name, mime_type, size_bytes, \
              created_at, last_modified) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&file.device_id)
        .bind(file.id)
        .bind(file.folder_id)
        .bind(&file.folder_path)
        .bind(&file.name)
        .bind(&file.mime_type)
        .bind(file.size_bytes)
        .bind(file.created_at)
        .bind(file.last_modified)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create file"))?;
        Ok(())
    }

    async fn set_folder_path(
        &self,
        device_id: &DeviceId,
        folder_id: FolderId,
        folder_path: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files SET folder_path = $3 WHERE device_id = $1 AND folder_id = $2",
        )
        .bind(device_id)
        .bind(folder_id)
        .bind(folder_path)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update file paths"))?;
        Ok(result.rows_affected())
    }

    async fn move_files(
        &self,
        device_id: &DeviceId,
        ids: &[FileId],
        folder_id: Option<FolderId>,
        folder_path: &str,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query(
            "UPDATE files SET folder_id = $3, folder_path = $4, last_modified = $5 \
             WHERE device_id = $1 AND id = ANY($2)",
        )
        .bind(device_id)
        .bind(&ids)
        .bind(folder_id)
        .bind(folder_path)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to move files"))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, device_id: &DeviceId, id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE device_id = $1 AND id = $2")
            .bind(device_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete file"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_in_folders(
        &self,
        device_id: &DeviceId,
        folder_ids: &[FolderId],
    ) -> AppResult<u64> {
        if folder_ids.is_empty() {
            return Ok(0);
        }
        let folder_ids: Vec<Uuid> = folder_ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM files WHERE device_id = $1 AND folder_id = ANY($2)")
            .bind(device_id)
            .bind(&folder_ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete files"))?;
        Ok(result.rows_affected())
    }
}
