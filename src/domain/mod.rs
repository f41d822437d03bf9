//! Domain layer: events, reservations, pricing, and form validation.
//!
//! Everything here is pure: the pricing engine, the reservation lifecycle
//! with its guarded side effects, and the form validation rules have no IO
//! and are tested in isolation.

pub mod event;
pub mod ids;
pub mod pricing;
pub mod reservation;
pub mod validation;

pub use event::{Event, EventPricing, EventType, EventUpdate, MinimumSpendMode};
pub use ids::{EventId, ReservationId};
pub use pricing::{CostBreakdown, reservation_cost};
pub use reservation::{
    ConfirmationState, Reservation, ReservationUpdate, SideEffect, has_table_collision,
};
pub use validation::{FieldErrors, PeopleBounds, ReservationForm, validate_reservation};
