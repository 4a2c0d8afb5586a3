//! Demo data seeding command.
//!
//! Inserts a small set of demo users, spots, images, reviews, and
//! bookings for local development. Idempotence is by username: if the
//! demo users already exist, seeding is refused.

use chrono::NaiveDate;
use clap::Args;

use crate::output;
use roost_auth::password::hasher::PasswordHasher;
use roost_core::error::AppError;
use roost_database::repositories::booking::BookingRepository;
use roost_database::repositories::review::ReviewRepository;
use roost_database::repositories::spot::SpotRepository;
use roost_database::repositories::spot_image::SpotImageRepository;
use roost_database::repositories::user::UserRepository;
use roost_entity::booking::{BookingWrite, CreateBooking};
use roost_entity::review::CreateReview;
use roost_entity::spot::{CreateSpot, CreateSpotImage};
use roost_entity::user::{CreateUser, User};

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Password assigned to every demo user
    #[arg(long, default_value = "roost-demo-password")]
    pub password: String,
}

/// Execute the seed command
pub async fn execute(args: &SeedArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    let user_repo = UserRepository::new(pool.clone());
    let spot_repo = SpotRepository::new(pool.clone());
    let image_repo = SpotImageRepository::new(pool.clone());
    let review_repo = ReviewRepository::new(pool.clone());
    let booking_repo = BookingRepository::new(pool.clone());

    if user_repo.find_by_username("Demo-lition").await?.is_some() {
        return Err(AppError::conflict(
            "Demo data already present (user 'Demo-lition' exists)",
        ));
    }

    let hash = PasswordHasher::new().hash_password(&args.password)?;

    let demo = create_user(&user_repo, "demo@user.io", "Demo-lition", "Demo", "User", &hash).await?;
    let user1 = create_user(&user_repo, "user1@user.io", "FakeUser1", "User", "One", &hash).await?;
    let user2 = create_user(&user_repo, "user2@user.io", "FakeUser2", "User", "Two", &hash).await?;

    let white_house = spot_repo
        .create(&CreateSpot {
            owner_id: demo.id,
            address: "1600 Pennsylvania Ave NW".to_string(),
            city: "Washington".to_string(),
            state: "DC".to_string(),
            country: "United States of America".to_string(),
            lat: 38.897957,
            lng: -77.03656,
            name: "The White House".to_string(),
            description:
                "The official residence and workplace of the President of the United States."
                    .to_string(),
            price: 500.0,
        })
        .await?;

    let eiffel = spot_repo
        .create(&CreateSpot {
            owner_id: user1.id,
            address: "Champ de Mars, 5 Av. Anatole France".to_string(),
            city: "Paris".to_string(),
            state: "Ile-de-France".to_string(),
            country: "France".to_string(),
            lat: 48.858844,
            lng: 2.294351,
            name: "Eiffel Tower".to_string(),
            description: "A wrought-iron lattice tower on the Champ de Mars in Paris.".to_string(),
            price: 750.0,
        })
        .await?;

    let colosseum = spot_repo
        .create(&CreateSpot {
            owner_id: user2.id,
            address: "Piazza del Colosseo, 1".to_string(),
            city: "Rome".to_string(),
            state: "Lazio".to_string(),
            country: "Italy".to_string(),
            lat: 41.89021,
            lng: 12.492231,
            name: "The Colosseum".to_string(),
            description: "An ancient amphitheater in the center of Rome.".to_string(),
            price: 600.0,
        })
        .await?;

    for (spot_id, url) in [
        (white_house.id, "https://images.example.com/white-house.jpg"),
        (eiffel.id, "https://images.example.com/eiffel-tower.jpg"),
        (colosseum.id, "https://images.example.com/colosseum.jpg"),
    ] {
        image_repo
            .create(&CreateSpotImage {
                spot_id,
                url: url.to_string(),
                preview: true,
            })
            .await?;
    }

    review_repo
        .create(&CreateReview {
            spot_id: eiffel.id,
            user_id: demo.id,
            review: "Breathtaking views, though the stairs are a workout.".to_string(),
            stars: 5,
        })
        .await?;
    review_repo
        .create(&CreateReview {
            spot_id: white_house.id,
            user_id: user1.id,
            review: "Historic stay, but security checks slow everything down.".to_string(),
            stars: 4,
        })
        .await?;

    let bookings = [
        (eiffel.id, demo.id, "2024-10-01", "2024-10-05"),
        (colosseum.id, user1.id, "2024-11-10", "2024-11-15"),
        (white_house.id, user2.id, "2024-12-05", "2024-12-10"),
    ];
    for (spot_id, user_id, start, end) in bookings {
        let write = booking_repo
            .create_exclusive(&CreateBooking {
                spot_id,
                user_id,
                start_date: parse_date(start)?,
                end_date: parse_date(end)?,
            })
            .await?;
        if let BookingWrite::Conflict(existing) = write {
            return Err(AppError::conflict(format!(
                "Seed booking on spot {spot_id} conflicts with {}",
                existing.id
            )));
        }
    }

    output::print_success("Demo data inserted");
    output::print_kv("users", "Demo-lition, FakeUser1, FakeUser2");
    output::print_kv("password", &args.password);
    Ok(())
}

async fn create_user(
    repo: &UserRepository,
    email: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    repo.create(&CreateUser {
        email: email.to_string(),
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password_hash: password_hash.to_string(),
    })
    .await
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    s.parse()
        .map_err(|_| AppError::internal(format!("Invalid seed date '{s}'")))
}
