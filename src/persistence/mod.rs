//! Persistence layer: PostgreSQL storage for events and reservations.
//!
//! Row models live in [`models`]; [`postgres::PgStore`] holds the
//! `sqlx::PgPool` and exposes the explicit queries the services need.

pub mod models;
pub mod postgres;

pub use postgres::PgStore;
