//! Modelo de Review
//!
//! Una review por reserva completada (constraint único sobre booking_id).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Review principal - mapea a la tabla reviews
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
