//! Controlador de reservas
//!
//! Admisión (validación ordenada + tarificación + cupón + insert
//! transaccional) y ciclo de vida (tabla de transiciones con override de
//! administrador).

use std::collections::HashMap;

use chrono::{Timelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::UserSummary;
use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::car_dto::CarResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{Booking, BookingStatus, PaymentMethod, PaymentStatus};
use crate::repositories::booking_repository::{BookingRepository, NewBooking};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::coupon_repository::CouponRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::{availability, pricing_service};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_datetime;

/// Ventana de operación: recogidas y entregas entre las 07:00 y las 22:00.
/// El chequeo compara únicamente el componente hora del timestamp tal y
/// como lo envió el cliente, así que 22:45 pasa y 23:00 no.
const OPENING_HOUR: u32 = 7;
const CLOSING_HOUR: u32 = 22;

fn outside_operating_hours(hour: u32) -> bool {
    hour < OPENING_HOUR || hour > CLOSING_HOUR
}

pub struct BookingController {
    bookings: BookingRepository,
    cars: CarRepository,
    coupons: CouponRepository,
    payments: PaymentRepository,
    users: UserRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            cars: CarRepository::new(pool.clone()),
            coupons: CouponRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Admisión de una reserva. El orden de validación es fijo y el primer
    /// fallo gana: fechas → horario de operación → coche → disponibilidad
    /// → cupón.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        let pickup_local = validate_datetime(&request.pickup_date)
            .map_err(|_| bad_request_error("Invalid pickup date"))?;
        let drop_local = validate_datetime(&request.drop_date)
            .map_err(|_| bad_request_error("Invalid drop date"))?;

        let pickup = pickup_local.with_timezone(&Utc);
        let drop = drop_local.with_timezone(&Utc);

        // La recogida no puede ser anterior al día de hoy
        let today_start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc();
        if pickup < today_start {
            return Err(bad_request_error("Pickup date cannot be in the past"));
        }

        if drop <= pickup {
            return Err(bad_request_error("Drop date must be after pickup date"));
        }

        if outside_operating_hours(pickup_local.hour()) {
            return Err(bad_request_error("Pickup time must be between 7 AM and 10 PM"));
        }
        if outside_operating_hours(drop_local.hour()) {
            return Err(bad_request_error("Drop time must be between 7 AM and 10 PM"));
        }

        let car = self
            .cars
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        // Chequeo de disponibilidad sobre las reservas activas del coche.
        // Reporta el conflicto antes de evaluar el cupón; la transacción de
        // creación repite la condición bajo lock.
        let active = self.bookings.find_active_for_car(car.id).await?;
        let conflict = active
            .iter()
            .any(|b| availability::intervals_conflict(b.pickup_at, b.drop_at, pickup, drop));

        if conflict {
            return Err(AppError::Conflict(
                "Car is not available for the selected dates".to_string(),
            ));
        }

        let quote = pricing_service::price(pickup, drop, car.price_per_day);

        // Cupón: mismo camino de evaluación que el endpoint de validación
        let mut discount = Decimal::ZERO;
        let mut coupon_code: Option<String> = None;

        if let Some(code) = &request.coupon_code {
            let code = code.trim().to_uppercase();
            let coupon = self
                .coupons
                .find_by_code(&code)
                .await?
                .ok_or_else(|| bad_request_error("Invalid coupon code"))?;

            discount = coupon
                .evaluate(Utc::now(), quote.amount, &car.car_type)
                .map_err(|rejection| AppError::BadRequest(rejection.message()))?;
            coupon_code = Some(code);
        }

        let total_amount = quote.amount - discount;

        let booking = self
            .bookings
            .create(NewBooking {
                user_id,
                car_id: car.id,
                pickup_at: pickup,
                drop_at: drop,
                total_days: quote.days,
                original_amount: quote.amount,
                discount,
                total_amount,
                coupon_code,
                payment_method: request.payment_method,
            })
            .await?;

        let user = self.users.find_by_id(user_id).await?;

        Ok(BookingResponse::from_booking(
            booking,
            Some(CarResponse::from(car)),
            user.map(UserSummary::from),
        ))
    }

    /// Reservas del propio cliente, más recientes primero
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.find_by_user(user_id).await?;
        self.attach_details(bookings, false).await
    }

    /// Todas las reservas (admin), con coche y cliente adjuntos
    pub async fn list_all(&self) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.find_all().await?;
        self.attach_details(bookings, true).await
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        requester: &AuthenticatedUser,
    ) -> Result<BookingResponse, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != requester.user_id && !requester.is_admin() {
            return Err(AppError::Forbidden(
                "Not authorized to view this booking".to_string(),
            ));
        }

        self.attach_one(booking).await
    }

    /// Transición de estado (admin). Las transiciones legales son datos;
    /// `force` permite al administrador alcanzar cualquier estado.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<BookingResponse, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let target = request.status;

        if !request.force && !booking.status.can_transition_to(target) {
            let message = if booking.status.is_terminal() {
                format!("Booking is already {}", booking.status.as_str())
            } else {
                format!(
                    "Illegal transition from '{}' to '{}'",
                    booking.status.as_str(),
                    target.as_str()
                )
            };
            return Err(bad_request_error(&message));
        }

        // Completar una reserva en efectivo marca el pago como completado
        // y liquida el registro de pago (upsert idempotente por reserva)
        let completes_cash_payment =
            target == BookingStatus::Completed && booking.payment_method == PaymentMethod::Cash;

        let payment_status = completes_cash_payment.then_some(PaymentStatus::Completed);

        let updated = self.bookings.update_status(id, target, payment_status).await?;

        if completes_cash_payment {
            self.payments
                .upsert_completed(
                    booking.id,
                    booking.user_id,
                    booking.total_amount,
                    PaymentMethod::Cash,
                    None,
                    None,
                )
                .await?;
        }

        self.attach_one(updated).await
    }

    async fn attach_one(&self, booking: Booking) -> Result<BookingResponse, AppError> {
        let car = self.cars.find_by_id(booking.car_id).await?;
        let user = self.users.find_by_id(booking.user_id).await?;

        Ok(BookingResponse::from_booking(
            booking,
            car.map(CarResponse::from),
            user.map(UserSummary::from),
        ))
    }

    /// Adjuntar detalles de coche (y cliente) a un listado de reservas
    /// con dos lecturas en batch en lugar de una por reserva.
    async fn attach_details(
        &self,
        bookings: Vec<Booking>,
        include_users: bool,
    ) -> Result<Vec<BookingResponse>, AppError> {
        let mut car_ids: Vec<Uuid> = bookings.iter().map(|b| b.car_id).collect();
        car_ids.sort_unstable();
        car_ids.dedup();

        let cars: HashMap<Uuid, CarResponse> = self
            .cars
            .find_by_ids(&car_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, CarResponse::from(c)))
            .collect();

        let users: HashMap<Uuid, UserSummary> = if include_users {
            let mut user_ids: Vec<Uuid> = bookings.iter().map(|b| b.user_id).collect();
            user_ids.sort_unstable();
            user_ids.dedup();

            self.users
                .find_by_ids(&user_ids)
                .await?
                .into_iter()
                .map(|u| (u.id, UserSummary::from(u)))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let car = cars.get(&booking.car_id).cloned();
                let user = users.get(&booking.user_id).cloned();
                BookingResponse::from_booking(booking, car, user)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operating_hours_boundaries() {
        assert!(outside_operating_hours(6)); // 06:30 se rechaza
        assert!(!outside_operating_hours(7));
        assert!(!outside_operating_hours(12));
        assert!(!outside_operating_hours(22)); // 22:45 pasa el chequeo de hora
        assert!(outside_operating_hours(23)); // 23:00 se rechaza
        assert!(outside_operating_hours(0));
    }

    #[test]
    fn test_hour_check_uses_client_local_hour() {
        // 22:45 hora del cliente: el componente hora es 22 y pasa, aunque
        // en UTC fuese otra hora completamente distinta
        let dt = validate_datetime("2026-08-10T22:45:00+05:30").unwrap();
        assert!(!outside_operating_hours(dt.hour()));

        let dt = validate_datetime("2026-08-10T23:00:00+05:30").unwrap();
        assert!(outside_operating_hours(dt.hour()));

        let dt = validate_datetime("2026-08-10T06:30:00+05:30").unwrap();
        assert!(outside_operating_hours(dt.hour()));
    }
}
