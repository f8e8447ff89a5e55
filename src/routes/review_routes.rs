//! Rutas de reviews

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::review_controller::ReviewController;
use crate::dto::review_dto::{CreateReviewRequest, ReviewResponse};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_review_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_review))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/:car_id", get(get_car_reviews))
        .merge(protected)
}

async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let controller = ReviewController::new(state.pool.clone());
    let review = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn get_car_reviews(
    State(state): State<AppState>,
    Path(car_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let controller = ReviewController::new(state.pool.clone());
    let reviews = controller.list_for_car(car_id).await?;
    Ok(Json(reviews))
}
