//! Rutas de cupones

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::coupon_controller::CouponController;
use crate::dto::coupon_dto::{
    ActiveCouponResponse, CouponResponse, CreateCouponRequest, UpdateCouponRequest,
    ValidateCouponRequest, ValidateCouponResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_coupon_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_coupon))
        .route("/", get(list_coupons))
        .route("/:id", put(update_coupon))
        .route("/:id", delete(delete_coupon))
        .route_layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/active", get(list_active_coupons))
        .route("/validate", post(validate_coupon))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

async fn create_coupon(
    State(state): State<AppState>,
    Json(request): Json<CreateCouponRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CouponResponse>>), AppError> {
    let controller = CouponController::new(state.pool.clone());
    let coupon = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(coupon))))
}

async fn list_coupons(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CouponResponse>>>, AppError> {
    let controller = CouponController::new(state.pool.clone());
    let coupons = controller.list().await?;
    Ok(Json(ApiResponse::success(coupons)))
}

async fn update_coupon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCouponRequest>,
) -> Result<Json<ApiResponse<CouponResponse>>, AppError> {
    let controller = CouponController::new(state.pool.clone());
    let coupon = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success(coupon)))
}

async fn delete_coupon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CouponController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Coupon deleted successfully".to_string(),
    )))
}

async fn validate_coupon(
    State(state): State<AppState>,
    Json(request): Json<ValidateCouponRequest>,
) -> Result<Json<ApiResponse<ValidateCouponResponse>>, AppError> {
    let controller = CouponController::new(state.pool.clone());
    let result = controller.validate(request).await?;
    Ok(Json(ApiResponse::success(result)))
}

async fn list_active_coupons(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ActiveCouponResponse>>>, AppError> {
    let controller = CouponController::new(state.pool.clone());
    let coupons = controller.list_active().await?;
    Ok(Json(ApiResponse::success(coupons)))
}
