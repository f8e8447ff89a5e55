//! Rutas de ciudades

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::city_controller::CityController;
use crate::dto::city_dto::{AddCityRequest, CityAdminResponse, CityResponse, UpdateCityRequest};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_city_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/all", get(list_all_cities))
        .route("/", post(add_city))
        .route("/:id", put(update_city))
        .route("/:id", delete(delete_city))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().route("/", get(list_cities)).merge(admin)
}

async fn list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityResponse>>, AppError> {
    let controller = CityController::new(state.pool.clone());
    let cities = controller.list_active().await?;
    Ok(Json(cities))
}

async fn list_all_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityAdminResponse>>, AppError> {
    let controller = CityController::new(state.pool.clone());
    let cities = controller.list_all().await?;
    Ok(Json(cities))
}

async fn add_city(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AddCityRequest>,
) -> Result<(StatusCode, Json<CityAdminResponse>), AppError> {
    let controller = CityController::new(state.pool.clone());
    let city = controller.add(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCityRequest>,
) -> Result<Json<CityAdminResponse>, AppError> {
    let controller = CityController::new(state.pool.clone());
    let city = controller.update(id, request).await?;
    Ok(Json(city))
}

async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CityController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(json!({ "message": "City deleted successfully" })))
}
