//! Rutas de reservas

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(get_all_bookings))
        .route("/:id/status", put(update_booking_status))
        .route_layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/", post(create_booking))
        .route("/user", get(get_user_bookings))
        .route("/:id", get(get_booking))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn get_user_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let bookings = controller.list_for_user(user.user_id).await?;
    Ok(Json(bookings))
}

async fn get_all_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let bookings = controller.list_all().await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.get_by_id(id, &user).await?;
    Ok(Json(booking))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.update_status(id, request).await?;
    Ok(Json(booking))
}
