//! Review CRUD service.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roost_core::error::AppError;
use roost_database::repositories::review::ReviewRepository;
use roost_database::repositories::review_image::ReviewImageRepository;
use roost_database::repositories::spot::SpotRepository;
use roost_entity::review::image::MAX_IMAGES_PER_REVIEW;
use roost_entity::review::{
    CreateReview, CreateReviewImage, Review, ReviewImage, ReviewWithSpot, ReviewWithUser,
    UpdateReview,
};

use crate::context::RequestContext;

/// A review of the current user, with its spot summary and images.
#[derive(Debug, Clone)]
pub struct UserReview {
    /// The review joined with its spot.
    pub review: ReviewWithSpot,
    /// Images attached to the review.
    pub images: Vec<ReviewImage>,
}

/// A review in a spot's list, with the reviewer's name and images.
#[derive(Debug, Clone)]
pub struct SpotReview {
    /// The review joined with its reviewer.
    pub review: ReviewWithUser,
    /// Images attached to the review.
    pub images: Vec<ReviewImage>,
}

/// Manages reviews, their images, and authorship rules.
#[derive(Debug, Clone)]
pub struct ReviewService {
    /// Review repository.
    review_repo: Arc<ReviewRepository>,
    /// Review image repository.
    image_repo: Arc<ReviewImageRepository>,
    /// Spot repository (existence and ownership checks).
    spot_repo: Arc<SpotRepository>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        review_repo: Arc<ReviewRepository>,
        image_repo: Arc<ReviewImageRepository>,
        spot_repo: Arc<SpotRepository>,
    ) -> Self {
        Self {
            review_repo,
            image_repo,
            spot_repo,
        }
    }

    /// Lists the current user's reviews with spot summaries and images.
    pub async fn list_current(&self, ctx: &RequestContext) -> Result<Vec<UserReview>, AppError> {
        let reviews = self.review_repo.find_by_user_with_spot(ctx.user_id).await?;
        let mut images = self
            .images_by_review(reviews.iter().map(|r| r.id).collect())
            .await?;

        Ok(reviews
            .into_iter()
            .map(|review| {
                let images = images.remove(&review.id).unwrap_or_default();
                UserReview { review, images }
            })
            .collect())
    }

    /// Lists a spot's reviews with reviewer names and images.
    pub async fn list_for_spot(&self, spot_id: Uuid) -> Result<Vec<SpotReview>, AppError> {
        self.spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        let reviews = self.review_repo.find_by_spot_with_user(spot_id).await?;
        let mut images = self
            .images_by_review(reviews.iter().map(|r| r.id).collect())
            .await?;

        Ok(reviews
            .into_iter()
            .map(|review| {
                let images = images.remove(&review.id).unwrap_or_default();
                SpotReview { review, images }
            })
            .collect())
    }

    /// Creates a review for a spot.
    ///
    /// A spot's owner may not review it, and the unique (spot, user)
    /// constraint rejects a second review as a conflict.
    pub async fn create_review(
        &self,
        ctx: &RequestContext,
        spot_id: Uuid,
        review: String,
        stars: i32,
    ) -> Result<Review, AppError> {
        let spot = self
            .spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        if spot.owner_id == ctx.user_id {
            return Err(AppError::forbidden("You cannot review your own spot"));
        }

        let review = self
            .review_repo
            .create(&CreateReview {
                spot_id,
                user_id: ctx.user_id,
                review,
                stars,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            spot_id = %spot_id,
            review_id = %review.id,
            stars = review.stars,
            "Review created"
        );

        Ok(review)
    }

    /// Updates a review. Only the author may edit.
    pub async fn update_review(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
        text: Option<String>,
        stars: Option<i32>,
    ) -> Result<Review, AppError> {
        self.require_authored(ctx, review_id).await?;

        let review = self
            .review_repo
            .update(&UpdateReview {
                id: review_id,
                review: text,
                stars,
            })
            .await?;

        info!(user_id = %ctx.user_id, review_id = %review_id, "Review updated");

        Ok(review)
    }

    /// Deletes a review. Only the author may delete; images cascade.
    pub async fn delete_review(&self, ctx: &RequestContext, review_id: Uuid) -> Result<(), AppError> {
        self.require_authored(ctx, review_id).await?;

        self.review_repo.delete(review_id).await?;

        info!(user_id = %ctx.user_id, review_id = %review_id, "Review deleted");

        Ok(())
    }

    /// Attaches an image to an authored review, up to the per-review cap.
    pub async fn add_image(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
        url: String,
    ) -> Result<ReviewImage, AppError> {
        self.require_authored(ctx, review_id).await?;

        let count = self.image_repo.count_by_review(review_id).await?;
        if count >= MAX_IMAGES_PER_REVIEW {
            return Err(AppError::forbidden(
                "Maximum number of images for this review was reached",
            ));
        }

        let image = self
            .image_repo
            .create(&CreateReviewImage { review_id, url })
            .await?;

        info!(
            user_id = %ctx.user_id,
            review_id = %review_id,
            image_id = %image.id,
            "Review image added"
        );

        Ok(image)
    }

    /// Deletes a review image. Only the author of the parent review may
    /// delete.
    pub async fn delete_image(&self, ctx: &RequestContext, image_id: Uuid) -> Result<(), AppError> {
        let image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review image couldn't be found"))?;

        self.require_authored(ctx, image.review_id).await?;

        self.image_repo.delete(image_id).await?;

        info!(user_id = %ctx.user_id, image_id = %image_id, "Review image deleted");

        Ok(())
    }

    /// Loads a review and rejects the request unless the current user
    /// wrote it.
    async fn require_authored(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
    ) -> Result<Review, AppError> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review couldn't be found"))?;

        if review.user_id != ctx.user_id {
            return Err(AppError::forbidden("You can only modify your own reviews"));
        }

        Ok(review)
    }

    /// Fetches the images of the given reviews, grouped by review ID.
    async fn images_by_review(
        &self,
        review_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<ReviewImage>>, AppError> {
        if review_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let images = self.image_repo.find_by_reviews(&review_ids).await?;

        let mut grouped: HashMap<Uuid, Vec<ReviewImage>> = HashMap::new();
        for image in images {
            grouped.entry(image.review_id).or_default().push(image);
        }
        Ok(grouped)
    }
}
