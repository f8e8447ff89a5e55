//! Cálculo de precios
//!
//! Funciones puras de pricing, sin acceso a base de datos.
//! La política de facturación redondea siempre hacia arriba al día
//! completo: 25 horas se cobran como 2 días.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Resultado del cálculo de precio de una ventana de alquiler
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub days: i32,
    pub amount: Decimal,
}

/// Calcular días facturables e importe base para una ventana y tarifa diaria.
///
/// `days = ceil(horas / 24)`, mínimo 1 si la ventana es positiva; una
/// ventana no positiva produce 0 días (el controlador ya rechaza
/// `drop <= pickup` antes de llegar aquí).
pub fn price(pickup: DateTime<Utc>, drop: DateTime<Utc>, daily_rate: Decimal) -> Quote {
    let seconds = (drop - pickup).num_seconds();

    if seconds <= 0 {
        return Quote {
            days: 0,
            amount: Decimal::ZERO,
        };
    }

    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    let days = days.max(1) as i32;

    Quote {
        days,
        amount: Decimal::from(days) * daily_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_exact_24_hours_is_one_day() {
        // Lunes 10:00 → martes 10:00
        let quote = price(at(2026, 8, 10, 10, 0), at(2026, 8, 11, 10, 0), Decimal::from(2500));
        assert_eq!(quote.days, 1);
        assert_eq!(quote.amount, Decimal::from(2500));
    }

    #[test]
    fn test_25_hours_rounds_up_to_two_days() {
        // Lunes 10:00 → martes 11:00
        let quote = price(at(2026, 8, 10, 10, 0), at(2026, 8, 11, 11, 0), Decimal::from(2500));
        assert_eq!(quote.days, 2);
        assert_eq!(quote.amount, Decimal::from(5000));
    }

    #[test]
    fn test_48_hours_is_two_days() {
        // Lunes 09:00 → miércoles 09:00, tarifa ₹2.500/día → ₹5.000
        let quote = price(at(2026, 8, 10, 9, 0), at(2026, 8, 12, 9, 0), Decimal::from(2500));
        assert_eq!(quote.days, 2);
        assert_eq!(quote.amount, Decimal::from(5000));
    }

    #[test]
    fn test_short_window_charges_minimum_one_day() {
        let quote = price(at(2026, 8, 10, 10, 0), at(2026, 8, 10, 11, 0), Decimal::from(1800));
        assert_eq!(quote.days, 1);
        assert_eq!(quote.amount, Decimal::from(1800));
    }

    #[test]
    fn test_non_positive_window_yields_zero() {
        let t = at(2026, 8, 10, 10, 0);
        assert_eq!(price(t, t, Decimal::from(2500)).days, 0);

        let quote = price(at(2026, 8, 11, 10, 0), at(2026, 8, 10, 10, 0), Decimal::from(2500));
        assert_eq!(quote.days, 0);
        assert_eq!(quote.amount, Decimal::ZERO);
    }
}
