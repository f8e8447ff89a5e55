//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los clientes de servicios externos se
//! construyen una vez aquí y se inyectan explícitamente, sin estado
//! global ambiente.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::email_service::EmailService;
use crate::services::razorpay_service::RazorpayClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub gateway: RazorpayClient,
    pub mailer: EmailService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let gateway = RazorpayClient::new(&config);
        let mailer = EmailService::new(&config);

        Self {
            pool,
            config,
            gateway,
            mailer,
        }
    }
}
