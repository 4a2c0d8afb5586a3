//! Spot repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roost_core::error::{AppError, ErrorKind};
use roost_core::result::AppResult;
use roost_core::types::pagination::{PageRequest, PageResponse};
use roost_entity::spot::{CreateSpot, Spot, SpotRatingStats, SpotSummary, UpdateSpot};

/// Columns computed alongside a spot row for list views: the mean star
/// rating and the preview image URL.
const SUMMARY_COLUMNS: &str = "s.*, \
     (SELECT AVG(r.stars)::float8 FROM reviews r WHERE r.spot_id = s.id) AS avg_rating, \
     (SELECT si.url FROM spot_images si WHERE si.spot_id = s.id AND si.preview LIMIT 1) \
         AS preview_image";

/// Repository for spot CRUD and aggregate queries.
#[derive(Debug, Clone)]
pub struct SpotRepository {
    pool: PgPool,
}

impl SpotRepository {
    /// Create a new spot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a spot by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Spot>> {
        sqlx::query_as::<_, Spot>("SELECT * FROM spots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find spot by id", e))
    }

    /// List all spots with rating/preview aggregates, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<SpotSummary>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM spots")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count spots", e))?;

        let spots = sqlx::query_as::<_, SpotSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM spots s \
             ORDER BY s.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list spots", e))?;

        Ok(PageResponse::new(
            spots,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the spots owned by a user, with aggregates.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<SpotSummary>> {
        sqlx::query_as::<_, SpotSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM spots s \
             WHERE s.owner_id = $1 ORDER BY s.created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owned spots", e))
    }

    /// Review count and mean rating for one spot's detail view.
    pub async fn rating_stats(&self, spot_id: Uuid) -> AppResult<SpotRatingStats> {
        sqlx::query_as::<_, SpotRatingStats>(
            "SELECT COUNT(*) AS num_reviews, AVG(stars)::float8 AS avg_star_rating \
             FROM reviews WHERE spot_id = $1",
        )
        .bind(spot_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute rating stats", e)
        })
    }

    /// Create a new spot.
    pub async fn create(&self, data: &CreateSpot) -> AppResult<Spot> {
        sqlx::query_as::<_, Spot>(
            "INSERT INTO spots \
                 (owner_id, address, city, state, country, lat, lng, name, description, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(data.lat)
        .bind(data.lng)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create spot", e))
    }

    /// Partially update a spot. `None` fields keep their current value.
    pub async fn update(&self, data: &UpdateSpot) -> AppResult<Spot> {
        sqlx::query_as::<_, Spot>(
            "UPDATE spots SET address = COALESCE($2, address), \
                              city = COALESCE($3, city), \
                              state = COALESCE($4, state), \
                              country = COALESCE($5, country), \
                              lat = COALESCE($6, lat), \
                              lng = COALESCE($7, lng), \
                              name = COALESCE($8, name), \
                              description = COALESCE($9, description), \
                              price = COALESCE($10, price), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(data.lat)
        .bind(data.lng)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update spot", e))?
        .ok_or_else(|| AppError::not_found(format!("Spot {} not found", data.id)))
    }

    /// Delete a spot by ID. Images, reviews, and bookings cascade.
    pub async fn delete(&self, spot_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spots WHERE id = $1")
            .bind(spot_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete spot", e))?;

        Ok(result.rows_affected() > 0)
    }
}
