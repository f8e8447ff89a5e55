//! DTOs de reservas

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::auth_dto::UserSummary;
use crate::dto::car_dto::CarResponse;
use crate::models::booking::{Booking, BookingStatus, PaymentMethod, PaymentStatus};

/// Request para crear una reserva. Las fechas llegan como RFC3339 y se
/// parsean conservando el offset del cliente para el chequeo de horario
/// de operación.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub car_id: Uuid,
    pub pickup_date: String,
    pub drop_date: String,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
}

/// Request para transicionar el estado de una reserva (admin).
/// `force` salta la tabla de transiciones legales.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    #[serde(default)]
    pub force: bool,
}

/// Response de reserva con detalles de coche y cliente adjuntos
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub drop_date: DateTime<Utc>,
    pub total_days: i32,
    pub original_amount: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<CarResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl BookingResponse {
    pub fn from_booking(
        booking: Booking,
        car: Option<CarResponse>,
        user: Option<UserSummary>,
    ) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            car_id: booking.car_id,
            pickup_date: booking.pickup_at,
            drop_date: booking.drop_at,
            total_days: booking.total_days,
            original_amount: booking.original_amount,
            discount: booking.discount,
            total_amount: booking.total_amount,
            coupon_code: booking.coupon_code,
            payment_method: booking.payment_method,
            payment_status: booking.payment_status,
            status: booking.status,
            gateway_order_id: booking.gateway_order_id,
            gateway_payment_id: booking.gateway_payment_id,
            created_at: booking.created_at,
            car,
            user,
        }
    }
}
