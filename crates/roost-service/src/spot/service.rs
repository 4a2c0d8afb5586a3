//! Spot CRUD and aggregate service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roost_core::error::AppError;
use roost_core::types::pagination::{PageRequest, PageResponse};
use roost_database::repositories::spot::SpotRepository;
use roost_database::repositories::spot_image::SpotImageRepository;
use roost_database::repositories::user::UserRepository;
use roost_entity::spot::{
    CreateSpot, CreateSpotImage, Spot, SpotImage, SpotRatingStats, SpotSummary, UpdateSpot,
};
use roost_entity::user::User;

use crate::context::RequestContext;

/// A spot's full detail view: the row, its review aggregates, its images,
/// and the owner.
#[derive(Debug, Clone)]
pub struct SpotDetail {
    /// The spot itself.
    pub spot: Spot,
    /// Review count and mean rating.
    pub stats: SpotRatingStats,
    /// All images, preview first.
    pub images: Vec<SpotImage>,
    /// The owning user.
    pub owner: User,
}

/// Request to create a spot (owner comes from the request context).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateSpotRequest {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Request to update a spot. `None` fields are left unchanged.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateSpotRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Manages spot listings, their images, and ownership rules.
#[derive(Debug, Clone)]
pub struct SpotService {
    /// Spot repository.
    spot_repo: Arc<SpotRepository>,
    /// Spot image repository.
    image_repo: Arc<SpotImageRepository>,
    /// User repository (owner summaries).
    user_repo: Arc<UserRepository>,
}

impl SpotService {
    /// Creates a new spot service.
    pub fn new(
        spot_repo: Arc<SpotRepository>,
        image_repo: Arc<SpotImageRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            spot_repo,
            image_repo,
            user_repo,
        }
    }

    /// Lists all spots with rating/preview aggregates.
    pub async fn list_spots(&self, page: PageRequest) -> Result<PageResponse<SpotSummary>, AppError> {
        self.spot_repo.find_all(&page).await
    }

    /// Lists the current user's own spots.
    pub async fn list_owned(&self, ctx: &RequestContext) -> Result<Vec<SpotSummary>, AppError> {
        self.spot_repo.find_by_owner(ctx.user_id).await
    }

    /// Returns a spot's detail view.
    pub async fn get_spot(&self, spot_id: Uuid) -> Result<SpotDetail, AppError> {
        let spot = self
            .spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        let stats = self.spot_repo.rating_stats(spot_id).await?;
        let images = self.image_repo.find_by_spot(spot_id).await?;
        let owner = self
            .user_repo
            .find_by_id(spot.owner_id)
            .await?
            .ok_or_else(|| AppError::internal("Spot owner missing"))?;

        Ok(SpotDetail {
            spot,
            stats,
            images,
            owner,
        })
    }

    /// Creates a spot owned by the current user.
    pub async fn create_spot(
        &self,
        ctx: &RequestContext,
        req: CreateSpotRequest,
    ) -> Result<Spot, AppError> {
        let spot = self
            .spot_repo
            .create(&CreateSpot {
                owner_id: ctx.user_id,
                address: req.address,
                city: req.city,
                state: req.state,
                country: req.country,
                lat: req.lat,
                lng: req.lng,
                name: req.name,
                description: req.description,
                price: req.price,
            })
            .await?;

        info!(user_id = %ctx.user_id, spot_id = %spot.id, "Spot created");

        Ok(spot)
    }

    /// Updates a spot. Only the owner may update.
    pub async fn update_spot(
        &self,
        ctx: &RequestContext,
        spot_id: Uuid,
        req: UpdateSpotRequest,
    ) -> Result<Spot, AppError> {
        self.require_owned(ctx, spot_id).await?;

        let spot = self
            .spot_repo
            .update(&UpdateSpot {
                id: spot_id,
                address: req.address,
                city: req.city,
                state: req.state,
                country: req.country,
                lat: req.lat,
                lng: req.lng,
                name: req.name,
                description: req.description,
                price: req.price,
            })
            .await?;

        info!(user_id = %ctx.user_id, spot_id = %spot_id, "Spot updated");

        Ok(spot)
    }

    /// Deletes a spot. Only the owner may delete; images, reviews, and
    /// bookings cascade.
    pub async fn delete_spot(&self, ctx: &RequestContext, spot_id: Uuid) -> Result<(), AppError> {
        self.require_owned(ctx, spot_id).await?;

        self.spot_repo.delete(spot_id).await?;

        info!(user_id = %ctx.user_id, spot_id = %spot_id, "Spot deleted");

        Ok(())
    }

    /// Attaches an image to an owned spot. A new preview image demotes any
    /// existing one.
    pub async fn add_image(
        &self,
        ctx: &RequestContext,
        spot_id: Uuid,
        url: String,
        preview: bool,
    ) -> Result<SpotImage, AppError> {
        self.require_owned(ctx, spot_id).await?;

        if preview {
            self.image_repo.clear_preview(spot_id).await?;
        }

        let image = self
            .image_repo
            .create(&CreateSpotImage {
                spot_id,
                url,
                preview,
            })
            .await?;

        info!(user_id = %ctx.user_id, spot_id = %spot_id, image_id = %image.id, "Spot image added");

        Ok(image)
    }

    /// Deletes a spot image. Only the owner of the parent spot may delete.
    pub async fn delete_image(&self, ctx: &RequestContext, image_id: Uuid) -> Result<(), AppError> {
        let image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot image couldn't be found"))?;

        self.require_owned(ctx, image.spot_id).await?;

        self.image_repo.delete(image_id).await?;

        info!(user_id = %ctx.user_id, image_id = %image_id, "Spot image deleted");

        Ok(())
    }

    /// Loads a spot and rejects the request unless the current user owns it.
    async fn require_owned(&self, ctx: &RequestContext, spot_id: Uuid) -> Result<Spot, AppError> {
        let spot = self
            .spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        if spot.owner_id != ctx.user_id {
            return Err(AppError::forbidden("You do not own this spot"));
        }

        Ok(spot)
    }
}
