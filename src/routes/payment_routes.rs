//! Rutas de pagos

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::booking_dto::BookingResponse;
use crate::dto::payment_dto::{
    CreatePaymentOrderRequest, PaymentOrderResponse, PaymentResponse, VerifyPaymentRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(create_payment_order))
        .route("/verify", post(verify_payment))
        .route("/booking/:booking_id", get(get_payment_by_booking))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

fn controller(state: &AppState) -> PaymentController {
    PaymentController::new(state.pool.clone(), state.gateway.clone())
}

async fn create_payment_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePaymentOrderRequest>,
) -> Result<Json<PaymentOrderResponse>, AppError> {
    let order = controller(&state).create_order(&user, request).await?;
    Ok(Json(order))
}

async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let booking = controller(&state).verify(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        booking,
        "Payment verified successfully".to_string(),
    )))
}

async fn get_payment_by_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = controller(&state).get_by_booking(&user, booking_id).await?;
    Ok(Json(payment))
}
