//! Envío de emails salientes
//!
//! Cliente HTTP hacia la API de mail configurada. Sólo se usa para el
//! flujo de reset de password; la entrega es un colaborador externo.

use reqwest::Client;
use serde::Serialize;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Mensaje de email saliente
#[derive(Debug, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Servicio de email
#[derive(Clone)]
pub struct EmailService {
    http: Client,
    api_url: Option<String>,
    api_key: Option<String>,
    from: String,
}

#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl EmailService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
        }
    }

    /// Enviar un email via la API de mail configurada
    pub async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        let Some(api_url) = &self.api_url else {
            tracing::warn!("📧 MAIL_API_URL no configurada, email a {} descartado", message.to);
            return Err(AppError::ExternalApi("Mail API not configured".to_string()));
        };

        let request = SendMailRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
        };

        let mut builder = self.http.post(api_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error enviando email: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Mail API returned {}",
                response.status()
            )));
        }

        tracing::info!("📧 Email enviado a {}", message.to);
        Ok(())
    }
}
