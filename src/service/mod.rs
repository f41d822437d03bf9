//! Service layer: the use cases behind the HTTP handlers.
//!
//! Services orchestrate the store, mailer, invoice storage, and the pure
//! domain logic. Handlers stay thin and only translate between DTOs and
//! these calls.

pub mod event_service;
pub mod reservation_service;

pub use event_service::{EventService, NewEvent, ReservationOverview};
pub use reservation_service::{NewReservation, ReservationService};
