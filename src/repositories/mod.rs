//! Repositorios de acceso a datos
//!
//! Un repositorio por recurso, con queries sqlx verificadas en runtime.

pub mod booking_repository;
pub mod car_repository;
pub mod city_repository;
pub mod coupon_repository;
pub mod payment_repository;
pub mod review_repository;
pub mod user_repository;
