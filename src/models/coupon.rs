//! Modelo de Coupon
//!
//! Reglas de descuento. La evaluación de validez y el cálculo del
//! descuento viven aquí como un único camino compartido: tanto el
//! endpoint de validación como la admisión de reservas llaman a
//! `Coupon::evaluate`, de modo que ambas rutas no pueden divergir.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de descuento - mapea al ENUM discount_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Ámbito de aplicación - mapea al ENUM coupon_scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "coupon_scope", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CouponScope {
    All,
    Specific,
}

/// Coupon principal - mapea a la tabla coupons
#[derive(Debug, Clone, FromRow)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_booking_amount: Decimal,
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    pub applicable_to: CouponScope,
    pub car_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Motivo por el que un cupón no aplica a una reserva
#[derive(Debug, Clone, PartialEq)]
pub enum CouponRejection {
    Inactive,
    NotYetValid,
    Expired,
    UsageLimitReached,
    BelowMinimumAmount(Decimal),
    NotApplicableToCarType,
}

impl CouponRejection {
    pub fn message(&self) -> String {
        match self {
            CouponRejection::Inactive => "Coupon is inactive".to_string(),
            CouponRejection::NotYetValid => "Coupon is not yet valid".to_string(),
            CouponRejection::Expired => "Coupon has expired".to_string(),
            CouponRejection::UsageLimitReached => "Coupon usage limit reached".to_string(),
            CouponRejection::BelowMinimumAmount(min) => {
                format!("Minimum booking amount is ₹{}", min)
            }
            CouponRejection::NotApplicableToCarType => {
                "Coupon not applicable to this car type".to_string()
            }
        }
    }
}

impl Coupon {
    /// Chequeos de validez en orden, cortocircuitando en el primero que falla:
    /// activo → ventana de fechas → límite de uso → importe mínimo → tipo de coche.
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        booking_amount: Decimal,
        car_type: &str,
    ) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }

        if now < self.valid_from {
            return Err(CouponRejection::NotYetValid);
        }
        if now > self.valid_until {
            return Err(CouponRejection::Expired);
        }

        if let Some(limit) = self.usage_limit {
            if self.used_count >= limit {
                return Err(CouponRejection::UsageLimitReached);
            }
        }

        if booking_amount < self.min_booking_amount {
            return Err(CouponRejection::BelowMinimumAmount(self.min_booking_amount));
        }

        if self.applicable_to == CouponScope::Specific
            && !self.car_types.iter().any(|t| t == car_type)
        {
            return Err(CouponRejection::NotApplicableToCarType);
        }

        Ok(())
    }

    /// Calcular el descuento para un importe ya validado.
    /// Nunca supera el importe de la reserva; se redondea a la unidad
    /// entera de moneda más cercana.
    pub fn calculate_discount(&self, booking_amount: Decimal) -> Decimal {
        let mut discount = match self.discount_type {
            DiscountType::Percentage => {
                let raw = booking_amount * self.discount_value / Decimal::from(100);
                match self.max_discount {
                    Some(cap) if raw > cap => cap,
                    _ => raw,
                }
            }
            DiscountType::Fixed => self.discount_value,
        };

        if discount > booking_amount {
            discount = booking_amount;
        }

        discount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Camino único de evaluación: validez + descuento.
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        booking_amount: Decimal,
        car_type: &str,
    ) -> Result<Decimal, CouponRejection> {
        self.validate(now, booking_amount, car_type)?;
        Ok(self.calculate_discount(booking_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_coupon() -> Coupon {
        let now = Utc::now();
        Coupon {
            id: Uuid::new_v4(),
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(10),
            min_booking_amount: Decimal::from(1000),
            max_discount: None,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(30),
            usage_limit: None,
            used_count: 0,
            is_active: true,
            applicable_to: CouponScope::All,
            car_types: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let coupon = base_coupon();
        // SAVE10: 10% sobre ₹5.000 → ₹500
        let discount = coupon
            .evaluate(Utc::now(), Decimal::from(5000), "Sedan")
            .unwrap();
        assert_eq!(discount, Decimal::from(500));
    }

    #[test]
    fn test_percentage_discount_respects_cap() {
        let mut coupon = base_coupon();
        coupon.max_discount = Some(Decimal::from(500));
        // 10% de ₹10.000 serían ₹1.000 pero el tope es ₹500
        let discount = coupon
            .evaluate(Utc::now(), Decimal::from(10000), "Sedan")
            .unwrap();
        assert_eq!(discount, Decimal::from(500));
    }

    #[test]
    fn test_fixed_discount_never_exceeds_amount() {
        let mut coupon = base_coupon();
        coupon.discount_type = DiscountType::Fixed;
        coupon.discount_value = Decimal::from(2000);
        coupon.min_booking_amount = Decimal::ZERO;

        let discount = coupon
            .evaluate(Utc::now(), Decimal::from(1500), "SUV")
            .unwrap();
        assert_eq!(discount, Decimal::from(1500));
    }

    #[test]
    fn test_discount_rounds_to_nearest_unit() {
        let mut coupon = base_coupon();
        coupon.discount_value = Decimal::from(15);
        coupon.min_booking_amount = Decimal::ZERO;
        // 15% de ₹1.235 = 185,25 → ₹185
        let discount = coupon
            .evaluate(Utc::now(), Decimal::from(1235), "Sedan")
            .unwrap();
        assert_eq!(discount, Decimal::from(185));
    }

    #[test]
    fn test_inactive_rejected_first() {
        let mut coupon = base_coupon();
        coupon.is_active = false;
        coupon.valid_until = Utc::now() - Duration::days(1); // también expirado

        let err = coupon
            .evaluate(Utc::now(), Decimal::from(5000), "Sedan")
            .unwrap_err();
        assert_eq!(err, CouponRejection::Inactive);
    }

    #[test]
    fn test_date_window() {
        let now = Utc::now();
        let mut coupon = base_coupon();

        coupon.valid_from = now + Duration::days(1);
        assert_eq!(
            coupon.validate(now, Decimal::from(5000), "Sedan").unwrap_err(),
            CouponRejection::NotYetValid
        );

        coupon.valid_from = now - Duration::days(10);
        coupon.valid_until = now - Duration::days(1);
        assert_eq!(
            coupon.validate(now, Decimal::from(5000), "Sedan").unwrap_err(),
            CouponRejection::Expired
        );
    }

    #[test]
    fn test_usage_limit_reached() {
        let mut coupon = base_coupon();
        coupon.usage_limit = Some(1);
        coupon.used_count = 1;

        let err = coupon
            .evaluate(Utc::now(), Decimal::from(5000), "Sedan")
            .unwrap_err();
        assert_eq!(err, CouponRejection::UsageLimitReached);
    }

    #[test]
    fn test_minimum_amount() {
        let coupon = base_coupon();
        let err = coupon
            .evaluate(Utc::now(), Decimal::from(999), "Sedan")
            .unwrap_err();
        assert_eq!(
            err,
            CouponRejection::BelowMinimumAmount(Decimal::from(1000))
        );
        assert!(err.message().contains("1000"));
    }

    #[test]
    fn test_specific_car_types() {
        let mut coupon = base_coupon();
        coupon.applicable_to = CouponScope::Specific;
        coupon.car_types = vec!["SUV".to_string(), "Luxury".to_string()];

        assert!(coupon.evaluate(Utc::now(), Decimal::from(5000), "SUV").is_ok());
        assert_eq!(
            coupon
                .evaluate(Utc::now(), Decimal::from(5000), "Sedan")
                .unwrap_err(),
            CouponRejection::NotApplicableToCarType
        );
    }
}
