//! Cliente del gateway de pagos (Razorpay)
//!
//! Este módulo contiene el cliente HTTP para crear órdenes de pago y la
//! verificación de la firma del callback. La firma es un HMAC-SHA256 en
//! hex sobre `order_id|payment_id` con el key secret compartido.

use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Request de creación de orden hacia el gateway
#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    amount: i64, // en paise
    currency: String,
    receipt: String,
    notes: serde_json::Value,
}

/// Orden creada en el gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Cliente del gateway de pagos
#[derive(Clone)]
pub struct RazorpayClient {
    http: Client,
    key_id: String,
    key_secret: String,
    api_url: String,
}

impl RazorpayClient {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            http: Client::new(),
            key_id: config.razorpay_key_id.clone(),
            key_secret: config.razorpay_key_secret.clone(),
            api_url: config.razorpay_api_url.clone(),
        }
    }

    /// Key id público que el cliente web necesita para abrir el checkout
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Crear una orden en el gateway. El importe se convierte a paise.
    pub async fn create_order(
        &self,
        amount: Decimal,
        receipt: &str,
        notes: serde_json::Value,
    ) -> Result<GatewayOrder, AppError> {
        let paise = (amount * Decimal::from(100))
            .round()
            .to_i64()
            .ok_or_else(|| AppError::Internal(format!("Invalid order amount: {}", amount)))?;

        let request = CreateOrderRequest {
            amount: paise,
            currency: "INR".to_string(),
            receipt: receipt.to_string(),
            notes,
        };

        let response = self
            .http
            .post(format!("{}/orders", self.api_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error creando orden de pago: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Payment gateway returned {}: {}",
                status, body
            )));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de orden inválida: {}", e)))
    }

    /// Verificar la firma del callback del gateway
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(&self.key_secret, order_id, payment_id, signature)
    }
}

/// Verificación de firma: HMAC-SHA256 hex sobre `order_id|payment_id`.
/// La comparación se hace en tiempo constante via `verify_slice`.
pub fn verify_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());

    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let sig = sign("secret123", "order_abc", "pay_xyz");
        assert!(verify_signature("secret123", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_tampered_payment_id_rejected() {
        let sig = sign("secret123", "order_abc", "pay_xyz");
        assert!(!verify_signature("secret123", "order_abc", "pay_other", &sig));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let sig = sign("secret123", "order_abc", "pay_xyz");
        assert!(!verify_signature("other-secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_malformed_hex_rejected() {
        assert!(!verify_signature("secret123", "order_abc", "pay_xyz", "no-es-hex"));
        assert!(!verify_signature("secret123", "order_abc", "pay_xyz", ""));
    }
}
