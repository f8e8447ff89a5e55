//! Modelo de City
//!
//! Ciudades donde opera el servicio. El borrado es lógico via `is_active`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// City principal - mapea a la tabla cities
#[derive(Debug, Clone, FromRow)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
