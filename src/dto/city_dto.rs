//! DTOs de ciudades

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::city::City;

/// Request para añadir una ciudad
#[derive(Debug, Deserialize, Validate)]
pub struct AddCityRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub state: String,
}

/// Request para actualizar una ciudad
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCityRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub state: Option<String>,

    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Response pública de ciudad
#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub image_url: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state: city.state,
            image_url: city.image_url,
        }
    }
}

/// Response de ciudad para administración (incluye inactivas)
#[derive(Debug, Serialize)]
pub struct CityAdminResponse {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<City> for CityAdminResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state: city.state,
            image_url: city.image_url,
            is_active: city.is_active,
            created_at: city.created_at,
        }
    }
}
