//! Repositorio de reservas
//!
//! La admisión corre en una única transacción: lock de la fila del coche
//! (`FOR UPDATE`), chequeo de solape, incremento del cupón e insert. Dos
//! admisiones concurrentes del mismo coche quedan serializadas por el
//! lock; la constraint de exclusión del schema es el respaldo a nivel de
//! storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, PaymentMethod, PaymentStatus};
use crate::utils::errors::{is_constraint_violation, AppError};

/// Datos ya validados y tarificados de una nueva reserva
#[derive(Debug)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub pickup_at: DateTime<Utc>,
    pub drop_at: DateTime<Utc>,
    pub total_days: i32,
    pub original_amount: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Admisión transaccional. Devuelve Conflict si la ventana ya no está
    /// libre y BadRequest si el cupón agotó su límite de uso entre la
    /// validación y el insert.
    pub async fn create(&self, new: NewBooking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock de la fila del coche: serializa admisiones concurrentes
        let car_row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
                .bind(new.car_id)
                .fetch_optional(&mut *tx)
                .await?;

        if car_row.is_none() {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        // Chequeo de solape de intervalo cerrado dentro de la transacción
        let conflict: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM bookings
            WHERE car_id = $1
              AND status IN ('pending', 'confirmed')
              AND pickup_at <= $2
              AND drop_at >= $3
            LIMIT 1
            "#,
        )
        .bind(new.car_id)
        .bind(new.drop_at)
        .bind(new.pickup_at)
        .fetch_optional(&mut *tx)
        .await?;

        if conflict.is_some() {
            return Err(AppError::Conflict(
                "Car is not available for the selected dates".to_string(),
            ));
        }

        // El incremento de uso del cupón viaja en la misma transacción que
        // el insert: si el insert falla, el incremento se revierte. La
        // cláusula WHERE revalida el límite bajo concurrencia.
        if let Some(code) = &new.coupon_code {
            let result = sqlx::query(
                r#"
                UPDATE coupons
                SET used_count = used_count + 1, updated_at = NOW()
                WHERE code = $1
                  AND (usage_limit IS NULL OR used_count < usage_limit)
                "#,
            )
            .bind(code)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::BadRequest("Coupon usage limit reached".to_string()));
            }
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, user_id, car_id, pickup_at, drop_at, total_days,
                original_amount, discount, total_amount, coupon_code, payment_method
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.car_id)
        .bind(new.pickup_at)
        .bind(new.drop_at)
        .bind(new.total_days)
        .bind(new.original_amount)
        .bind(new.discount)
        .bind(new.total_amount)
        .bind(&new.coupon_code)
        .bind(new.payment_method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                AppError::Conflict("Car is not available for the selected dates".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Lectura pura: reservas activas (pending/confirmed) de un coche.
    /// El checker de disponibilidad aplica el predicado de solape sobre
    /// este conjunto; la transacción de admisión repite la condición en
    /// SQL bajo lock antes de insertar.
    pub async fn find_active_for_car(&self, car_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE car_id = $1 AND status IN ('pending', 'confirmed')
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Actualizar estado de reserva y, opcionalmente, el estado de pago
    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2,
                payment_status = COALESCE($3, payment_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(payment_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Reactivar una reserva cancelada puede chocar con otra activa
            if is_constraint_violation(&e) {
                AppError::Conflict(
                    "Another active booking overlaps this window".to_string(),
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(booking)
    }

    /// Confirmación tras verificar el pago en el gateway
    pub async fn confirm_payment(
        &self,
        id: Uuid,
        gateway_order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'confirmed',
                payment_status = 'completed',
                gateway_order_id = $2,
                gateway_payment_id = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(gateway_order_id)
        .bind(gateway_payment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Barrido del reaper: cancela en un único batch todas las reservas
    /// pendientes creadas antes del cutoff. Devuelve cuántas canceló.
    pub async fn cancel_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled', payment_status = 'failed', updated_at = NOW()
            WHERE status = 'pending' AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
