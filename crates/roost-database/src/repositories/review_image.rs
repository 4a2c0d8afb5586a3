//! Review image repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roost_core::error::{AppError, ErrorKind};
use roost_core::result::AppResult;
use roost_entity::review::{CreateReviewImage, ReviewImage};

/// Repository for review image rows.
#[derive(Debug, Clone)]
pub struct ReviewImageRepository {
    pool: PgPool,
}

impl ReviewImageRepository {
    /// Create a new review image repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach an image to a review.
    pub async fn create(&self, data: &CreateReviewImage) -> AppResult<ReviewImage> {
        sqlx::query_as::<_, ReviewImage>(
            "INSERT INTO review_images (review_id, url) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.review_id)
        .bind(&data.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create review image", e)
        })
    }

    /// Find an image by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ReviewImage>> {
        sqlx::query_as::<_, ReviewImage>("SELECT * FROM review_images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find review image", e)
            })
    }

    /// Count the images attached to a review.
    pub async fn count_by_review(&self, review_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM review_images WHERE review_id = $1")
            .bind(review_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count review images", e)
            })
    }

    /// List the images of every review in `review_ids`, oldest first.
    pub async fn find_by_reviews(&self, review_ids: &[Uuid]) -> AppResult<Vec<ReviewImage>> {
        sqlx::query_as::<_, ReviewImage>(
            "SELECT * FROM review_images WHERE review_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(review_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list review images", e)
        })
    }

    /// Delete an image by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM review_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete review image", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
