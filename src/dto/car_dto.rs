//! DTOs de coches

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::car::Car;

/// Request para crear un coche
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    pub car_type: String,

    pub fuel_type: String,

    #[validate(range(min = 2, max = 8))]
    pub seats: i32,

    pub price_per_day: Decimal,

    #[validate(length(min = 2, max = 100))]
    pub city: String,

    /// URLs opacas del almacén de imágenes externo
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,

    pub transmission: Option<String>,
    pub mileage: Option<String>,
    pub engine_capacity: Option<String>,
    pub color: Option<String>,

    #[validate(range(min = 1990, max = 2030))]
    pub year: Option<i32>,
}

/// Request para actualizar un coche existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    pub car_type: Option<String>,
    pub fuel_type: Option<String>,

    #[validate(range(min = 2, max = 8))]
    pub seats: Option<i32>,

    pub price_per_day: Option<Decimal>,

    #[validate(length(min = 2, max = 100))]
    pub city: Option<String>,

    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub transmission: Option<String>,
    pub mileage: Option<String>,
    pub engine_capacity: Option<String>,
    pub color: Option<String>,

    #[validate(range(min = 1990, max = 2030))]
    pub year: Option<i32>,
}

/// Filtros para búsqueda de coches
#[derive(Debug, Default, Deserialize)]
pub struct CarFilters {
    pub city: Option<String>,
    pub car_type: Option<String>,
    pub fuel_type: Option<String>,
    pub seats: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Par opcional pickup/drop: excluye coches con reservas activas solapadas
    pub pickup_date: Option<String>,
    pub drop_date: Option<String>,
    /// "price-low" | "price-high" | por defecto más recientes primero
    pub sort_by: Option<String>,
}

/// Response de coche para la API
#[derive(Debug, Clone, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub car_type: String,
    pub fuel_type: String,
    pub seats: i32,
    pub price_per_day: Decimal,
    pub city: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub transmission: String,
    pub mileage: Option<String>,
    pub engine_capacity: Option<String>,
    pub color: Option<String>,
    pub year: Option<i32>,
    pub ratings_average: Decimal,
    pub ratings_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            name: car.name,
            brand: car.brand,
            car_type: car.car_type,
            fuel_type: car.fuel_type,
            seats: car.seats,
            price_per_day: car.price_per_day,
            city: car.city,
            images: car.images,
            features: car.features,
            transmission: car.transmission,
            mileage: car.mileage,
            engine_capacity: car.engine_capacity,
            color: car.color,
            year: car.year,
            ratings_average: car.ratings_average,
            ratings_count: car.ratings_count,
            created_at: car.created_at,
        }
    }
}
