//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::service::{EventService, ReservationService};

/// Application state shared across all routes.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event operations.
    pub events: Arc<EventService>,
    /// Reservation operations.
    pub reservations: Arc<ReservationService>,
}
