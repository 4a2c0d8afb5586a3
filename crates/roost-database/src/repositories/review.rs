//! Review repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roost_core::error::{AppError, ErrorKind};
use roost_core::result::AppResult;
use roost_entity::review::{CreateReview, Review, ReviewWithSpot, ReviewWithUser, UpdateReview};

/// Repository for review CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a review by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// Find a user's review of a specific spot, if any.
    pub async fn find_by_spot_and_user(
        &self,
        spot_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE spot_id = $1 AND user_id = $2")
            .bind(spot_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find review by spot/user", e)
            })
    }

    /// List a user's reviews joined with spot summaries, newest first.
    pub async fn find_by_user_with_spot(&self, user_id: Uuid) -> AppResult<Vec<ReviewWithSpot>> {
        sqlx::query_as::<_, ReviewWithSpot>(
            "SELECT r.*, \
                    s.name AS spot_name, \
                    s.city AS spot_city, \
                    s.state AS spot_state, \
                    s.country AS spot_country, \
                    s.price AS spot_price \
             FROM reviews r \
             INNER JOIN spots s ON r.spot_id = s.id \
             WHERE r.user_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user reviews", e))
    }

    /// List a spot's reviews joined with reviewer names, newest first.
    pub async fn find_by_spot_with_user(&self, spot_id: Uuid) -> AppResult<Vec<ReviewWithUser>> {
        sqlx::query_as::<_, ReviewWithUser>(
            "SELECT r.*, \
                    u.first_name AS reviewer_first_name, \
                    u.last_name AS reviewer_last_name \
             FROM reviews r \
             INNER JOIN users u ON r.user_id = u.id \
             WHERE r.spot_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(spot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list spot reviews", e))
    }

    /// Create a new review.
    ///
    /// The unique (spot, user) constraint surfaces as a conflict so the
    /// API layer can answer 409 for a second review of the same spot.
    pub async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (spot_id, user_id, review, stars) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.spot_id)
        .bind(data.user_id)
        .bind(&data.review)
        .bind(data.stars)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("reviews_spot_id_user_id_key") =>
            {
                AppError::conflict("You have already reviewed this spot")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create review", e),
        })
    }

    /// Partially update a review. `None` fields keep their current value.
    pub async fn update(&self, data: &UpdateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET review = COALESCE($2, review), \
                                stars = COALESCE($3, stars), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.review)
        .bind(data.stars)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update review", e))?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", data.id)))
    }

    /// Delete a review by ID. Its images cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete review", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
