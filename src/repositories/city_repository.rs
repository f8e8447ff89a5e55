//! Repositorio de ciudades

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::city::City;
use crate::utils::errors::AppError;

pub struct CityRepository {
    pool: PgPool,
}

impl CityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self) -> Result<Vec<City>, AppError> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT * FROM cities WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }

    pub async fn find_all(&self) -> Result<Vec<City>, AppError> {
        let cities = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(cities)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(city)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(city)
    }

    pub async fn create(
        &self,
        name: String,
        state: String,
        created_by: Uuid,
    ) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (id, name, state, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(state)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(city)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        state: String,
        image_url: String,
        is_active: bool,
    ) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            UPDATE cities
            SET name = $2, state = $3, image_url = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(state)
        .bind(image_url)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(city)
    }

    /// Borrado lógico
    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE cities SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
