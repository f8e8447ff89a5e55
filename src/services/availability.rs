//! Comprobación de disponibilidad
//!
//! Predicado puro de solape de intervalos cerrados. La consulta SQL del
//! repositorio de reservas aplica exactamente la misma condición; este
//! helper existe para que la regla quede escrita (y testeada) una vez.

use chrono::{DateTime, Utc};

/// Dos ventanas entran en conflicto si `existing.pickup <= drop AND
/// existing.drop >= pickup` (intervalo cerrado: una entrega y una recogida
/// en el mismo instante cuentan como conflicto).
pub fn intervals_conflict(
    existing_pickup: DateTime<Utc>,
    existing_drop: DateTime<Utc>,
    pickup: DateTime<Utc>,
    drop: DateTime<Utc>,
) -> bool {
    existing_pickup <= drop && existing_drop >= pickup
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_disjoint_windows_do_not_conflict() {
        // Existente termina estrictamente antes de que empiece la candidata
        assert!(!intervals_conflict(day(1, 9), day(2, 9), day(2, 10), day(3, 10)));
        // Candidata termina estrictamente antes de que empiece la existente
        assert!(!intervals_conflict(day(5, 9), day(6, 9), day(3, 9), day(4, 9)));
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        // Entrega y recogida en el mismo instante: no se permite el relevo
        assert!(intervals_conflict(day(1, 9), day(2, 9), day(2, 9), day(3, 9)));
        assert!(intervals_conflict(day(2, 9), day(3, 9), day(1, 9), day(2, 9)));
    }

    #[test]
    fn test_contained_and_partial_overlaps_conflict() {
        // Candidata contenida en la existente
        assert!(intervals_conflict(day(1, 9), day(10, 9), day(3, 9), day(4, 9)));
        // Existente contenida en la candidata
        assert!(intervals_conflict(day(3, 9), day(4, 9), day(1, 9), day(10, 9)));
        // Solape parcial
        assert!(intervals_conflict(day(1, 9), day(3, 9), day(2, 9), day(5, 9)));
    }
}
