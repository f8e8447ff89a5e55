//! Rutas de autenticación y cuentas

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AuthResponse, CreateAdminRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UserResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, super_admin_only_middleware, AuthenticatedUser};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: &AppState) -> Router<AppState> {
    let rate_limit_state = RateLimitState::new(&state.config);

    // Endpoints públicos, con rate limiting para frenar fuerza bruta
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgotpassword", post(forgot_password))
        .route("/resetpassword/:token", put(reset_password))
        .route_layer(middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ));

    // Gestión de administradores: sólo super admin
    let super_admin = Router::new()
        .route("/create-admin", post(create_admin))
        .route("/admins", get(list_admins))
        .route("/admins/:id", delete(delete_admin))
        .route_layer(middleware::from_fn(super_admin_only_middleware));

    let protected = Router::new()
        .route("/me", get(me))
        .merge(super_admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), &state.config, state.mailer.clone())
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = controller(&state).register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = controller(&state).login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let response = controller(&state).me(user.user_id).await?;
    Ok(Json(response))
}

async fn create_admin(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let admin = controller(&state).create_admin(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            admin,
            "Admin user created successfully".to_string(),
        )),
    ))
}

async fn list_admins(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let admins = controller(&state).list_admins().await?;
    Ok(Json(admins))
}

async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).delete_admin(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Admin deleted successfully".to_string(),
    )))
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).forgot_password(request).await?;
    Ok(Json(ApiResponse::message_only("Email sent".to_string())))
}

async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = controller(&state).reset_password(&token, request).await?;
    Ok(Json(response))
}
