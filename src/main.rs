mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_rental=debug,tower_http=info".into()),
        )
        .init();

    info!("🚗 Car Rental - API de reservas");
    info!("================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    // CORS: orígenes explícitos en producción, permisivo en desarrollo
    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone());

    // Reaper de reservas abandonadas: un barrido al arrancar y después
    // uno por tick del intervalo configurado
    let _cleanup_task = services::cleanup_service::spawn(app_state.clone());

    // Crear router de la API
    let app = Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router(&app_state))
        .nest("/api/cars", routes::car_routes::create_car_router(&app_state))
        .nest("/api/cities", routes::city_routes::create_city_router(&app_state))
        .nest("/api/bookings", routes::booking_routes::create_booking_router(&app_state))
        .nest("/api/coupons", routes::coupon_routes::create_coupon_router(&app_state))
        .nest("/api/payments", routes::payment_routes::create_payment_router(&app_state))
        .nest("/api/reviews", routes::review_routes::create_review_router(&app_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registrar cliente");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil del usuario autenticado");
    info!("   POST /api/auth/forgotpassword - Solicitar reset de password");
    info!("   PUT  /api/auth/resetpassword/:token - Reset de password");
    info!("🚗 Cars:");
    info!("   GET  /api/cars - Listar coches con filtros");
    info!("   GET  /api/cars/:id - Obtener coche");
    info!("   POST /api/cars - Crear coche (admin)");
    info!("   PUT  /api/cars/:id - Actualizar coche (admin)");
    info!("   DELETE /api/cars/:id - Eliminar coche (admin)");
    info!("🏙️ Cities:");
    info!("   GET  /api/cities - Ciudades activas");
    info!("   GET  /api/cities/all - Todas las ciudades (admin)");
    info!("📅 Bookings:");
    info!("   POST /api/bookings - Crear reserva");
    info!("   GET  /api/bookings/user - Reservas del cliente");
    info!("   GET  /api/bookings/admin - Todas las reservas (admin)");
    info!("   PUT  /api/bookings/:id/status - Transición de estado (admin)");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("🎟️ Coupons:");
    info!("   POST /api/coupons/validate - Validar cupón");
    info!("   GET  /api/coupons/active - Cupones activos");
    info!("💳 Payments:");
    info!("   POST /api/payments/create - Crear orden en el gateway");
    info!("   POST /api/payments/verify - Verificar pago");
    info!("   GET  /api/payments/booking/:bookingId - Pago de una reserva");
    info!("⭐ Reviews:");
    info!("   POST /api/reviews - Crear review");
    info!("   GET  /api/reviews/:carId - Reviews de un coche");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Server is running",
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
