//! Repositorio de reviews

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::review_dto::ReviewResponse;
use crate::models::review::Review;
use crate::utils::errors::{is_constraint_violation, AppError};

pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        car_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, user_id, car_id, booking_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(car_id)
        .bind(booking_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                AppError::BadRequest("You have already reviewed this booking".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(review)
    }

    pub async fn exists_for_booking(&self, booking_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM reviews WHERE booking_id = $1)")
                .bind(booking_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Reviews de un coche con el nombre del autor, más recientes primero
    pub async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<ReviewResponse>, AppError> {
        let reviews = sqlx::query_as::<_, ReviewResponse>(
            r#"
            SELECT r.id, r.user_id, u.name AS user_name, r.car_id, r.booking_id,
                   r.rating, r.comment, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.car_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
