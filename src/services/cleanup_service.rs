//! Reaper de reservas obsoletas
//!
//! Barrido periódico que cancela reservas `pending` cuyo checkout fue
//! abandonado antes de pagar. Corre una vez al arrancar el proceso y
//! después en cada tick del intervalo configurado. Un barrido fallido se
//! loggea y se reintenta en el siguiente tick.

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::repositories::booking_repository::BookingRepository;
use crate::state::AppState;

/// Instante antes del cual una reserva `pending` se considera abandonada
pub fn stale_cutoff(now: DateTime<Utc>, stale_minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(stale_minutes)
}

/// Un barrido: cancela en batch todas las reservas pendientes obsoletas
/// (`status = cancelled`, `payment_status = failed`).
pub async fn cleanup_stale_bookings(state: &AppState) -> Result<u64, sqlx::Error> {
    let repository = BookingRepository::new(state.pool.clone());
    let cutoff = stale_cutoff(Utc::now(), state.config.booking_stale_minutes);

    let cancelled = repository.cancel_stale(cutoff).await?;

    if cancelled > 0 {
        info!("🧹 [Cleanup] {} reservas pendientes obsoletas canceladas", cancelled);
    }

    Ok(cancelled)
}

/// Lanzar la tarea periódica del reaper. El primer tick del intervalo de
/// tokio se completa inmediatamente, lo que cubre el barrido de arranque.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
            state.config.cleanup_interval_secs,
        ));

        loop {
            ticker.tick().await;
            if let Err(e) = cleanup_stale_bookings(&state).await {
                error!("🧹 [Cleanup] Error cancelando reservas obsoletas: {}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stale_cutoff_is_threshold_minutes_ago() {
        let now = Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap();
        let cutoff = stale_cutoff(now, 10);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2026, 8, 10, 11, 50, 0).unwrap());

        // Una reserva creada hace 11 minutos queda antes del cutoff (se barre);
        // una de hace 9 minutos queda después (no se barre todavía).
        let eleven_min_ago = now - Duration::minutes(11);
        let nine_min_ago = now - Duration::minutes(9);
        assert!(eleven_min_ago < cutoff);
        assert!(nine_min_ago > cutoff);
    }
}
