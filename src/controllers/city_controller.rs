//! Controlador de ciudades

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::city_dto::{AddCityRequest, CityAdminResponse, CityResponse, UpdateCityRequest};
use crate::repositories::city_repository::CityRepository;
use crate::utils::errors::{bad_request_error, AppError};

pub struct CityController {
    repository: CityRepository,
}

impl CityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CityRepository::new(pool),
        }
    }

    pub async fn list_active(&self) -> Result<Vec<CityResponse>, AppError> {
        let cities = self.repository.find_active().await?;
        Ok(cities.into_iter().map(CityResponse::from).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<CityAdminResponse>, AppError> {
        let cities = self.repository.find_all().await?;
        Ok(cities.into_iter().map(CityAdminResponse::from).collect())
    }

    pub async fn add(
        &self,
        created_by: Uuid,
        request: AddCityRequest,
    ) -> Result<CityAdminResponse, AppError> {
        request.validate()?;

        let name = request.name.trim().to_string();
        let state = request.state.trim().to_string();

        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(bad_request_error("City already exists"));
        }

        let city = self.repository.create(name, state, created_by).await?;

        Ok(CityAdminResponse::from(city))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCityRequest,
    ) -> Result<CityAdminResponse, AppError> {
        request.validate()?;

        let mut city = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("City not found".to_string()))?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name != city.name && self.repository.find_by_name(&name).await?.is_some() {
                return Err(bad_request_error("City name already exists"));
            }
            city.name = name;
        }
        if let Some(state) = request.state {
            city.state = state.trim().to_string();
        }
        if let Some(image_url) = request.image_url {
            city.image_url = image_url;
        }
        if let Some(is_active) = request.is_active {
            city.is_active = is_active;
        }

        let updated = self
            .repository
            .update(city.id, city.name, city.state, city.image_url, city.is_active)
            .await?;

        Ok(CityAdminResponse::from(updated))
    }

    /// Borrado lógico: la ciudad deja de aparecer en el listado público
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("City not found".to_string()))?;

        self.repository.deactivate(id).await
    }
}
