//! # weindampfer-api
//!
//! REST API for table reservations on themed boat events.
//!
//! The service runs the two event lines of the venue — the classic
//! Weindampfer evenings and the Jeckeria carnival parties. Guests submit
//! reservation requests through the public forms; the admin backend
//! confirms, cancels, assigns tables, sends guest mail with payment data,
//! and prints the guest list for the door staff.
//!
//! ## Architecture
//!
//! ```text
//! Clients (public forms, admin dashboard)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EventService / ReservationService (service/)
//!     │
//!     ├── Pricing, Lifecycle, Validation (domain/ — pure)
//!     │
//!     ├── Mailer (mailer/ — SMTP)
//!     ├── Guest-list PDF (pdf)
//!     ├── InvoiceStore (storage — filesystem)
//!     │
//!     └── PostgreSQL Persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod mailer;
pub mod pdf;
pub mod persistence;
pub mod service;
pub mod storage;
