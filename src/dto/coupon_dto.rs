//! DTOs de cupones

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::coupon::{Coupon, CouponScope, DiscountType};

/// Request para crear un cupón
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCouponRequest {
    #[validate(length(min = 3, max = 20))]
    pub code: String,

    pub discount_type: DiscountType,

    pub discount_value: Decimal,

    pub min_booking_amount: Option<Decimal>,

    /// Tope de descuento, sólo con sentido para tipo percentage
    pub max_discount: Option<Decimal>,

    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: DateTime<Utc>,

    pub usage_limit: Option<i32>,
    pub is_active: Option<bool>,
    pub applicable_to: Option<CouponScope>,
    pub car_types: Option<Vec<String>>,
}

/// Request para actualizar un cupón
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCouponRequest {
    pub discount_value: Option<Decimal>,
    pub min_booking_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub is_active: Option<bool>,
    pub applicable_to: Option<CouponScope>,
    pub car_types: Option<Vec<String>>,
}

/// Request de validación de cupón contra un importe y tipo de coche
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateCouponRequest {
    #[validate(length(min = 3, max = 20))]
    pub code: String,

    pub booking_amount: Decimal,

    pub car_type: String,
}

/// Response de validación exitosa
#[derive(Debug, Serialize)]
pub struct ValidateCouponResponse {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub discount: Decimal,
    pub original_amount: Decimal,
    pub final_amount: Decimal,
}

/// Response completa de cupón (administración)
#[derive(Debug, Serialize)]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    pub applicable_to: CouponScope,
    pub car_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id,
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_booking_amount: coupon.min_booking_amount,
            max_discount: coupon.max_discount,
            valid_from: coupon.valid_from,
            valid_until: coupon.valid_until,
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            is_active: coupon.is_active,
            applicable_to: coupon.applicable_to,
            car_types: coupon.car_types,
            created_at: coupon.created_at,
        }
    }
}

/// Response reducida para el listado de cupones activos visible al cliente
#[derive(Debug, Serialize)]
pub struct ActiveCouponResponse {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Decimal,
    pub valid_until: DateTime<Utc>,
}

impl From<Coupon> for ActiveCouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_booking_amount: coupon.min_booking_amount,
            valid_until: coupon.valid_until,
        }
    }
}
