//! Módulo de base de datos
//!
//! Maneja la conexión y migraciones con PostgreSQL

pub mod connection;

pub use connection::{create_pool, run_migrations};
