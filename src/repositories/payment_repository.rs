//! Repositorio de pagos
//!
//! Un pago por reserva (UNIQUE sobre booking_id). El upsert hace
//! idempotente la liquidación: completar dos veces la misma reserva
//! produce exactamente un registro de pago.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::PaymentMethod;
use crate::models::payment::Payment;
use crate::utils::errors::AppError;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear o actualizar el registro de pago completado de una reserva
    pub async fn upsert_completed(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        amount: Decimal,
        payment_method: PaymentMethod,
        gateway_order_id: Option<&str>,
        gateway_payment_id: Option<&str>,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                id, booking_id, user_id, amount, payment_method,
                gateway_order_id, gateway_payment_id, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'completed')
            ON CONFLICT (booking_id) DO UPDATE
            SET amount = EXCLUDED.amount,
                payment_method = EXCLUDED.payment_method,
                gateway_order_id = EXCLUDED.gateway_order_id,
                gateway_payment_id = EXCLUDED.gateway_payment_id,
                status = 'completed',
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(user_id)
        .bind(amount)
        .bind(payment_method)
        .bind(gateway_order_id)
        .bind(gateway_payment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE booking_id = $1")
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payment)
    }
}
