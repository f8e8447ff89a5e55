//! Servicios del sistema
//!
//! Lógica de dominio pura (pricing, disponibilidad), clientes de
//! servicios externos (gateway de pagos, mail) y la tarea periódica
//! de limpieza de reservas abandonadas.

pub mod availability;
pub mod cleanup_service;
pub mod email_service;
pub mod pricing_service;
pub mod razorpay_service;
