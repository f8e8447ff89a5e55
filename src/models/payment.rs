//! Modelo de Payment
//!
//! Registro de liquidación 1:1 con una reserva. La unicidad por
//! `booking_id` hace idempotente el upsert al completar una reserva.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::booking::{PaymentMethod, PaymentStatus};

/// Payment principal - mapea a la tabla payments
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
