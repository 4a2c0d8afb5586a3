//! Spot image repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roost_core::error::{AppError, ErrorKind};
use roost_core::result::AppResult;
use roost_entity::spot::{CreateSpotImage, SpotImage};

/// Repository for spot image rows.
#[derive(Debug, Clone)]
pub struct SpotImageRepository {
    pool: PgPool,
}

impl SpotImageRepository {
    /// Create a new spot image repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach an image to a spot.
    pub async fn create(&self, data: &CreateSpotImage) -> AppResult<SpotImage> {
        sqlx::query_as::<_, SpotImage>(
            "INSERT INTO spot_images (spot_id, url, preview) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.spot_id)
        .bind(&data.url)
        .bind(data.preview)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create spot image", e))
    }

    /// Find an image by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SpotImage>> {
        sqlx::query_as::<_, SpotImage>("SELECT * FROM spot_images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find spot image", e)
            })
    }

    /// List the images of a spot, preview first.
    pub async fn find_by_spot(&self, spot_id: Uuid) -> AppResult<Vec<SpotImage>> {
        sqlx::query_as::<_, SpotImage>(
            "SELECT * FROM spot_images WHERE spot_id = $1 \
             ORDER BY preview DESC, created_at ASC",
        )
        .bind(spot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list spot images", e))
    }

    /// Unset the preview flag on all of a spot's images.
    ///
    /// Called before inserting a new preview so a spot never carries two.
    pub async fn clear_preview(&self, spot_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE spot_images SET preview = FALSE WHERE spot_id = $1 AND preview")
            .bind(spot_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear preview flag", e)
            })?;
        Ok(())
    }

    /// Delete an image by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spot_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete spot image", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
