//! Modelo de Car
//!
//! Coches disponibles para alquiler. El rating agregado se mantiene
//! desde el flujo de reviews; la lógica de precios sólo lee
//! `price_per_day` y `car_type`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de coche admitidos
pub const CAR_TYPES: &[&str] = &["Sedan", "SUV", "Hatchback", "Luxury", "Sports", "Electric"];

/// Tipos de combustible admitidos
pub const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "Electric", "Hybrid"];

/// Transmisiones admitidas
pub const TRANSMISSIONS: &[&str] = &["Manual", "Automatic"];

/// Car principal - mapea a la tabla cars
#[derive(Debug, Clone, FromRow)]
pub struct Car {
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
    pub updated_at: DateTime<Utc>,
}
