//! Controlador de pagos
//!
//! Creación de órdenes en el gateway y verificación del callback firmado.
//! La confirmación de pago mueve la reserva a `confirmed` y liquida el
//! registro de pago con un upsert idempotente.

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::booking_dto::BookingResponse;
use crate::dto::payment_dto::{
    CreatePaymentOrderRequest, PaymentOrderResponse, PaymentResponse, VerifyPaymentRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{BookingStatus, PaymentMethod};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::services::razorpay_service::RazorpayClient;
use crate::utils::errors::{bad_request_error, AppError};

pub struct PaymentController {
    bookings: BookingRepository,
    payments: PaymentRepository,
    gateway: RazorpayClient,
}

impl PaymentController {
    pub fn new(pool: PgPool, gateway: RazorpayClient) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool),
            gateway,
        }
    }

    /// Crear una orden en el gateway para una reserva card/upi propia
    pub async fn create_order(
        &self,
        requester: &AuthenticatedUser,
        request: CreatePaymentOrderRequest,
    ) -> Result<PaymentOrderResponse, AppError> {
        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != requester.user_id {
            return Err(AppError::Forbidden("Not authorized".to_string()));
        }

        if booking.payment_method == PaymentMethod::Cash {
            return Err(bad_request_error("This booking is set for cash payment"));
        }

        if booking.status != BookingStatus::Pending {
            return Err(bad_request_error("Booking is not awaiting payment"));
        }

        let order = self
            .gateway
            .create_order(
                booking.total_amount,
                &format!("receipt_{}", booking.id),
                json!({
                    "booking_id": booking.id.to_string(),
                    "user_id": booking.user_id.to_string(),
                    "payment_method": booking.payment_method,
                }),
            )
            .await?;

        Ok(PaymentOrderResponse {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: self.gateway.key_id().to_string(),
        })
    }

    /// Verificar la firma del callback del gateway y confirmar la reserva
    pub async fn verify(
        &self,
        request: VerifyPaymentRequest,
    ) -> Result<BookingResponse, AppError> {
        let signature_valid = self.gateway.verify_signature(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        );

        if !signature_valid {
            return Err(bad_request_error("Payment verification failed"));
        }

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let confirmed = self
            .bookings
            .confirm_payment(
                booking.id,
                &request.razorpay_order_id,
                &request.razorpay_payment_id,
            )
            .await?;

        self.payments
            .upsert_completed(
                confirmed.id,
                confirmed.user_id,
                confirmed.total_amount,
                confirmed.payment_method,
                Some(&request.razorpay_order_id),
                Some(&request.razorpay_payment_id),
            )
            .await?;

        Ok(BookingResponse::from_booking(confirmed, None, None))
    }

    pub async fn get_by_booking(
        &self,
        requester: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<PaymentResponse, AppError> {
        let payment = self
            .payments
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        if payment.user_id != requester.user_id && !requester.is_admin() {
            return Err(AppError::Forbidden("Not authorized".to_string()));
        }

        Ok(PaymentResponse::from(payment))
    }
}
