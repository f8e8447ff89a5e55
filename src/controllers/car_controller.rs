//! Controlador de coches

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarFilters, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::models::car::{CAR_TYPES, FUEL_TYPES, TRANSMISSIONS};
use crate::repositories::car_repository::{CarRepository, CarSearch, NewCar};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    /// Listado público con filtros. Si llegan pickup y drop se excluyen
    /// los coches con reservas activas solapadas.
    pub async fn list(&self, filters: CarFilters) -> Result<Vec<CarResponse>, AppError> {
        let available_window = match (&filters.pickup_date, &filters.drop_date) {
            (Some(pickup), Some(drop)) => {
                let pickup = validate_datetime(pickup)
                    .map_err(|_| bad_request_error("Invalid pickup date"))?
                    .with_timezone(&Utc);
                let drop = validate_datetime(drop)
                    .map_err(|_| bad_request_error("Invalid drop date"))?
                    .with_timezone(&Utc);

                if drop <= pickup {
                    return Err(bad_request_error("Drop date must be after pickup date"));
                }

                Some((pickup, drop))
            }
            _ => None,
        };

        let cars = self
            .repository
            .search(CarSearch {
                city: filters.city,
                car_type: filters.car_type,
                fuel_type: filters.fuel_type,
                seats: filters.seats,
                min_price: filters.min_price,
                max_price: filters.max_price,
                available_window,
                sort_by: filters.sort_by,
            })
            .await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        Ok(CarResponse::from(car))
    }

    pub async fn create(&self, request: CreateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        validate_catalog_value("car type", &request.car_type, CAR_TYPES)?;
        validate_catalog_value("fuel type", &request.fuel_type, FUEL_TYPES)?;

        let transmission = request.transmission.unwrap_or_else(|| "Manual".to_string());
        validate_catalog_value("transmission", &transmission, TRANSMISSIONS)?;

        if request.price_per_day.is_sign_negative() {
            return Err(bad_request_error("Price per day cannot be negative"));
        }

        let car = self
            .repository
            .create(NewCar {
                name: request.name,
                brand: request.brand,
                car_type: request.car_type,
                fuel_type: request.fuel_type,
                seats: request.seats,
                price_per_day: request.price_per_day,
                city: request.city,
                images: request.images,
                features: request.features,
                transmission,
                mileage: request.mileage,
                engine_capacity: request.engine_capacity,
                color: request.color,
                year: request.year,
            })
            .await?;

        Ok(CarResponse::from(car))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCarRequest) -> Result<CarResponse, AppError> {
        request.validate()?;

        let mut car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if let Some(car_type) = request.car_type {
            validate_catalog_value("car type", &car_type, CAR_TYPES)?;
            car.car_type = car_type;
        }
        if let Some(fuel_type) = request.fuel_type {
            validate_catalog_value("fuel type", &fuel_type, FUEL_TYPES)?;
            car.fuel_type = fuel_type;
        }
        if let Some(transmission) = request.transmission {
            validate_catalog_value("transmission", &transmission, TRANSMISSIONS)?;
            car.transmission = transmission;
        }
        if let Some(price) = request.price_per_day {
            if price.is_sign_negative() {
                return Err(bad_request_error("Price per day cannot be negative"));
            }
            car.price_per_day = price;
        }

        if let Some(name) = request.name {
            car.name = name;
        }
        if let Some(brand) = request.brand {
            car.brand = brand;
        }
        if let Some(seats) = request.seats {
            car.seats = seats;
        }
        if let Some(city) = request.city {
            car.city = city;
        }
        if let Some(images) = request.images {
            car.images = images;
        }
        if let Some(features) = request.features {
            car.features = features;
        }
        if request.mileage.is_some() {
            car.mileage = request.mileage;
        }
        if request.engine_capacity.is_some() {
            car.engine_capacity = request.engine_capacity;
        }
        if request.color.is_some() {
            car.color = request.color;
        }
        if request.year.is_some() {
            car.year = request.year;
        }

        let updated = self.repository.update(&car).await?;

        Ok(CarResponse::from(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        self.repository.delete(id).await
    }
}

fn validate_catalog_value(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if !allowed.contains(&value) {
        return Err(bad_request_error(&format!(
            "Invalid {}: '{}' (allowed: {})",
            field,
            value,
            allowed.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_catalog_value() {
        assert!(validate_catalog_value("car type", "SUV", CAR_TYPES).is_ok());
        assert!(validate_catalog_value("car type", "Tractor", CAR_TYPES).is_err());
        assert!(validate_catalog_value("fuel type", "Hybrid", FUEL_TYPES).is_ok());
        assert!(validate_catalog_value("transmission", "Automatic", TRANSMISSIONS).is_ok());
    }
}
