//! Controlador de reviews
//!
//! Sólo se puede reseñar una reserva propia y completada, una vez.
//! Cada review recalcula el rating agregado del coche.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::review_dto::{CreateReviewRequest, ReviewResponse};
use crate::models::booking::BookingStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{bad_request_error, AppError};

pub struct ReviewController {
    reviews: ReviewRepository,
    bookings: BookingRepository,
    cars: CarRepository,
    users: UserRepository,
}

impl ReviewController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reviews: ReviewRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            cars: CarRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        request.validate()?;

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .filter(|b| b.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.status != BookingStatus::Completed {
            return Err(bad_request_error("You can only review completed bookings"));
        }

        if self.reviews.exists_for_booking(booking.id).await? {
            return Err(bad_request_error("You have already reviewed this booking"));
        }

        let review = self
            .reviews
            .create(
                user_id,
                booking.car_id,
                booking.id,
                request.rating,
                request.comment,
            )
            .await?;

        // Mantener el rating agregado del coche como media de sus reviews
        self.cars.refresh_ratings(booking.car_id).await?;

        let user_name = self
            .users
            .find_by_id(user_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_default();

        Ok(ReviewResponse {
            id: review.id,
            user_id: review.user_id,
            user_name,
            car_id: review.car_id,
            booking_id: review.booking_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        })
    }

    pub async fn list_for_car(&self, car_id: Uuid) -> Result<Vec<ReviewResponse>, AppError> {
        self.reviews.find_by_car(car_id).await
    }
}
