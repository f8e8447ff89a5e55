//! Repositorio de coches

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::car::Car;
use crate::utils::errors::AppError;

/// Datos ya validados de un coche nuevo
#[derive(Debug)]
pub struct NewCar {
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
}

/// Parámetros ya normalizados de búsqueda de coches
#[derive(Debug, Default)]
pub struct CarSearch {
    pub city: Option<String>,
    pub car_type: Option<String>,
    pub fuel_type: Option<String>,
    pub seats: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Excluir coches con reservas activas solapadas con esta ventana
    pub available_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub sort_by: Option<String>,
}

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, search: CarSearch) -> Result<Vec<Car>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM cars WHERE 1=1");

        if let Some(city) = &search.city {
            qb.push(" AND city ILIKE ");
            qb.push_bind(format!("%{}%", city));
        }
        if let Some(car_type) = &search.car_type {
            qb.push(" AND car_type = ");
            qb.push_bind(car_type.clone());
        }
        if let Some(fuel_type) = &search.fuel_type {
            qb.push(" AND fuel_type = ");
            qb.push_bind(fuel_type.clone());
        }
        if let Some(seats) = search.seats {
            qb.push(" AND seats = ");
            qb.push_bind(seats);
        }
        if let Some(min_price) = search.min_price {
            qb.push(" AND price_per_day >= ");
            qb.push_bind(min_price);
        }
        if let Some(max_price) = search.max_price {
            qb.push(" AND price_per_day <= ");
            qb.push_bind(max_price);
        }

        // El filtro de disponibilidad aplica la misma condición de solape
        // de intervalo cerrado que la admisión de reservas
        if let Some((pickup, drop)) = search.available_window {
            qb.push(
                " AND NOT EXISTS (SELECT 1 FROM bookings b WHERE b.car_id = cars.id \
                 AND b.status IN ('pending', 'confirmed') AND b.pickup_at <= ",
            );
            qb.push_bind(drop);
            qb.push(" AND b.drop_at >= ");
            qb.push_bind(pickup);
            qb.push(")");
        }

        match search.sort_by.as_deref() {
            Some("price-low") => {
                qb.push(" ORDER BY price_per_day ASC");
            }
            Some("price-high") => {
                qb.push(" ORDER BY price_per_day DESC");
            }
            _ => {
                qb.push(" ORDER BY created_at DESC");
            }
        }

        let cars = qb.build_query_as::<Car>().fetch_all(&self.pool).await?;

        Ok(cars)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    pub async fn create(&self, new: NewCar) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (
                id, name, brand, car_type, fuel_type, seats, price_per_day, city,
                images, features, transmission, mileage, engine_capacity, color, year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.brand)
        .bind(new.car_type)
        .bind(new.fuel_type)
        .bind(new.seats)
        .bind(new.price_per_day)
        .bind(new.city)
        .bind(new.images)
        .bind(new.features)
        .bind(new.transmission)
        .bind(new.mileage)
        .bind(new.engine_capacity)
        .bind(new.color)
        .bind(new.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    /// Actualización completa: el controlador ya fusionó los campos
    /// opcionales del request con el estado actual del coche.
    pub async fn update(&self, car: &Car) -> Result<Car, AppError> {
        let updated = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET name = $2, brand = $3, car_type = $4, fuel_type = $5, seats = $6,
                price_per_day = $7, city = $8, images = $9, features = $10,
                transmission = $11, mileage = $12, engine_capacity = $13,
                color = $14, year = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(&car.name)
        .bind(&car.brand)
        .bind(&car.car_type)
        .bind(&car.fuel_type)
        .bind(car.seats)
        .bind(car.price_per_day)
        .bind(&car.city)
        .bind(&car.images)
        .bind(&car.features)
        .bind(&car.transmission)
        .bind(&car.mileage)
        .bind(&car.engine_capacity)
        .bind(&car.color)
        .bind(car.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Recalcular el rating agregado del coche a partir de sus reviews
    pub async fn refresh_ratings(&self, car_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE cars
            SET ratings_average = COALESCE(
                    (SELECT ROUND(AVG(rating)::numeric, 2) FROM reviews WHERE car_id = $1), 0),
                ratings_count = (SELECT COUNT(*) FROM reviews WHERE car_id = $1),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(car_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
