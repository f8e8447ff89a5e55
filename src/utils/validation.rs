//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Los códigos de cupón se almacenan en mayúsculas: letras, dígitos, guión y guión bajo
    static ref COUPON_CODE_RE: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9_-]{2,19}$").unwrap();
}

/// Validar y convertir string a datetime RFC3339.
/// Se conserva el offset del cliente: la ventana de horario de operación
/// se evalúa sobre la hora tal y como la envió el cliente.
pub fn validate_datetime(value: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(value).map_err(|_| {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"RFC3339".to_string());
        error
    })
}

/// Validar formato de código de cupón (ya normalizado a mayúsculas)
pub fn validate_coupon_code(code: &str) -> Result<(), ValidationError> {
    if !COUPON_CODE_RE.is_match(code) {
        let mut error = ValidationError::new("coupon_code");
        error.add_param("value".into(), &code.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_validate_datetime_keeps_client_offset() {
        let dt = validate_datetime("2026-08-10T22:45:00+05:30").unwrap();
        assert_eq!(dt.hour(), 22);
        assert_eq!(dt.minute(), 45);

        assert!(validate_datetime("2026-08-10").is_err());
        assert!(validate_datetime("10/08/2026 22:45").is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SAVE10").is_ok());
        assert!(validate_coupon_code("MONSOON_25").is_ok());
        assert!(validate_coupon_code("save10").is_err()); // sin normalizar
        assert!(validate_coupon_code("AB").is_err()); // demasiado corto
        assert!(validate_coupon_code("WITH SPACE").is_err());
    }
}
