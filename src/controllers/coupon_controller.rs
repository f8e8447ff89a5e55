//! Controlador de cupones
//!
//! El endpoint de validación usa exactamente el mismo camino de
//! evaluación (`Coupon::evaluate`) que la admisión de reservas, y nunca
//! incrementa el contador de usos.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::coupon_dto::{
    ActiveCouponResponse, CouponResponse, CreateCouponRequest, UpdateCouponRequest,
    ValidateCouponRequest, ValidateCouponResponse,
};
use crate::models::coupon::{CouponScope, DiscountType};
use crate::repositories::coupon_repository::{CouponRepository, NewCoupon};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_coupon_code;

pub struct CouponController {
    repository: CouponRepository,
}

impl CouponController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CouponRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateCouponRequest) -> Result<CouponResponse, AppError> {
        request.validate()?;

        let code = request.code.trim().to_uppercase();
        validate_coupon_code(&code).map_err(|_| bad_request_error("Invalid coupon code format"))?;

        if request.discount_value.is_sign_negative() {
            return Err(bad_request_error("Discount value cannot be negative"));
        }
        if request.discount_type == DiscountType::Percentage
            && request.discount_value > Decimal::from(100)
        {
            return Err(bad_request_error("Percentage discount cannot exceed 100"));
        }

        if let Some(valid_from) = request.valid_from {
            if request.valid_until <= valid_from {
                return Err(bad_request_error("Expiry date must be after the start date"));
            }
        }

        let coupon = self
            .repository
            .create(NewCoupon {
                code,
                discount_type: request.discount_type,
                discount_value: request.discount_value,
                min_booking_amount: request.min_booking_amount.unwrap_or(Decimal::ZERO),
                max_discount: request.max_discount,
                valid_from: request.valid_from,
                valid_until: request.valid_until,
                usage_limit: request.usage_limit,
                is_active: request.is_active.unwrap_or(true),
                applicable_to: request.applicable_to.unwrap_or(CouponScope::All),
                car_types: request.car_types.unwrap_or_default(),
            })
            .await?;

        Ok(CouponResponse::from(coupon))
    }

    pub async fn list(&self) -> Result<Vec<CouponResponse>, AppError> {
        let coupons = self.repository.find_all().await?;
        Ok(coupons.into_iter().map(CouponResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCouponRequest,
    ) -> Result<CouponResponse, AppError> {
        request.validate()?;

        let mut coupon = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        if let Some(discount_value) = request.discount_value {
            if discount_value.is_sign_negative() {
                return Err(bad_request_error("Discount value cannot be negative"));
            }
            if coupon.discount_type == DiscountType::Percentage
                && discount_value > Decimal::from(100)
            {
                return Err(bad_request_error("Percentage discount cannot exceed 100"));
            }
            coupon.discount_value = discount_value;
        }
        if let Some(min_booking_amount) = request.min_booking_amount {
            coupon.min_booking_amount = min_booking_amount;
        }
        if request.max_discount.is_some() {
            coupon.max_discount = request.max_discount;
        }
        if let Some(valid_from) = request.valid_from {
            coupon.valid_from = valid_from;
        }
        if let Some(valid_until) = request.valid_until {
            coupon.valid_until = valid_until;
        }
        if request.usage_limit.is_some() {
            coupon.usage_limit = request.usage_limit;
        }
        if let Some(is_active) = request.is_active {
            coupon.is_active = is_active;
        }
        if let Some(applicable_to) = request.applicable_to {
            coupon.applicable_to = applicable_to;
        }
        if let Some(car_types) = request.car_types {
            coupon.car_types = car_types;
        }

        if coupon.valid_until <= coupon.valid_from {
            return Err(bad_request_error("Expiry date must be after the start date"));
        }

        let updated = self.repository.update(&coupon).await?;

        Ok(CouponResponse::from(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        self.repository.delete(id).await
    }

    /// Validación sin efectos: calcula el descuento pero no consume usos
    pub async fn validate(
        &self,
        request: ValidateCouponRequest,
    ) -> Result<ValidateCouponResponse, AppError> {
        request.validate()?;

        let code = request.code.trim().to_uppercase();
        let coupon = self
            .repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid coupon code".to_string()))?;

        let discount = coupon
            .evaluate(Utc::now(), request.booking_amount, &request.car_type)
            .map_err(|rejection| AppError::BadRequest(rejection.message()))?;

        Ok(ValidateCouponResponse {
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            discount,
            original_amount: request.booking_amount,
            final_amount: request.booking_amount - discount,
        })
    }

    pub async fn list_active(&self) -> Result<Vec<ActiveCouponResponse>, AppError> {
        let coupons = self.repository.find_active(Utc::now()).await?;
        Ok(coupons.into_iter().map(ActiveCouponResponse::from).collect())
    }
}
