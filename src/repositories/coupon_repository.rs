//! Repositorio de cupones
//!
//! El incremento de `used_count` en la admisión de una reserva NO vive
//! aquí: se hace dentro de la transacción de creación de la reserva en
//! el repositorio de bookings, para que no pueda quedar huérfano.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::coupon::{Coupon, CouponScope, DiscountType};
use crate::utils::errors::{is_constraint_violation, AppError};

/// Datos ya normalizados para crear un cupón (código en mayúsculas)
#[derive(Debug)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Decimal,
    pub max_discount: Option<Decimal>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub is_active: bool,
    pub applicable_to: CouponScope,
    pub car_types: Vec<String>,
}

pub struct CouponRepository {
    pool: PgPool,
}

impl CouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewCoupon) -> Result<Coupon, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO coupons (
                id, code, discount_type, discount_value, min_booking_amount, max_discount,
                valid_from, valid_until, usage_limit, is_active, applicable_to, car_types
            )
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()), $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.code)
        .bind(new.discount_type)
        .bind(new.discount_value)
        .bind(new.min_booking_amount)
        .bind(new.max_discount)
        .bind(new.valid_from)
        .bind(new.valid_until)
        .bind(new.usage_limit)
        .bind(new.is_active)
        .bind(new.applicable_to)
        .bind(&new.car_types)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                AppError::Conflict(format!("Coupon code '{}' already exists", new.code))
            } else {
                e.into()
            }
        })?;

        Ok(coupon)
    }

    pub async fn find_all(&self) -> Result<Vec<Coupon>, AppError> {
        let coupons =
            sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(coupons)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Coupon>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(coupon)
    }

    /// Búsqueda por código ya normalizado a mayúsculas
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(coupon)
    }

    /// Cupones visibles al cliente: activos y dentro de la ventana de validez
    pub async fn find_active(&self, now: DateTime<Utc>) -> Result<Vec<Coupon>, AppError> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT * FROM coupons
            WHERE is_active = TRUE AND valid_from <= $1 AND valid_until >= $1
            ORDER BY valid_until ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    /// Actualización completa: el controlador ya fusionó los campos
    pub async fn update(&self, coupon: &Coupon) -> Result<Coupon, AppError> {
        let updated = sqlx::query_as::<_, Coupon>(
            r#"
            UPDATE coupons
            SET discount_value = $2, min_booking_amount = $3, max_discount = $4,
                valid_from = $5, valid_until = $6, usage_limit = $7, is_active = $8,
                applicable_to = $9, car_types = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(coupon.id)
        .bind(coupon.discount_value)
        .bind(coupon.min_booking_amount)
        .bind(coupon.max_discount)
        .bind(coupon.valid_from)
        .bind(coupon.valid_until)
        .bind(coupon.usage_limit)
        .bind(coupon.is_active)
        .bind(coupon.applicable_to)
        .bind(&coupon.car_types)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
