//! Event management: creation, updates, listings, and the admin overview
//! of an event's reservations.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    CostBreakdown, Event, EventId, EventType, EventUpdate, MinimumSpendMode, Reservation,
    has_table_collision, reservation_cost,
};
use crate::error::ApiError;
use crate::pdf;
use crate::persistence::PgStore;

/// Events stay listed for a grace week after they took place so the admin
/// can still work through open payments.
const LISTING_GRACE_DAYS: i64 = 7;

/// Input for creating a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Display name.
    pub name: String,
    /// Date and boarding time.
    pub date: DateTime<Utc>,
    /// Event line.
    pub event_type: EventType,
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Premium minimum spend, optional.
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price in euros.
    pub ticket_price: i64,
    /// Premium ticket price, optional.
    pub ticket_price_premium: Option<i64>,
    /// Minimum spend mode.
    pub minimum_spend_mode: MinimumSpendMode,
}

/// A reservation of an event together with the derived admin dashboard
/// fields.
#[derive(Debug, Clone)]
pub struct ReservationOverview {
    /// The reservation itself.
    pub reservation: Reservation,
    /// Cost computed from the event's current pricing.
    pub cost: CostBreakdown,
    /// Whether another confirmed reservation holds the same table number.
    pub double_booking: bool,
}

/// Event operations for the admin backend and the public site.
#[derive(Debug, Clone)]
pub struct EventService {
    store: PgStore,
}

impl EventService {
    /// Creates the service on top of the store.
    #[must_use]
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }

    /// Creates a new event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, ApiError> {
        let event = Event {
            id: EventId::new(),
            name: new.name,
            date: new.date,
            event_type: new.event_type,
            minimum_spend: new.minimum_spend,
            minimum_spend_premium: new.minimum_spend_premium,
            ticket_price: new.ticket_price,
            ticket_price_premium: new.ticket_price_premium,
            minimum_spend_mode: new.minimum_spend_mode,
            created_at: Utc::now(),
        };
        self.store.insert_event(&event).await?;
        tracing::info!(event_id = %event.id, name = %event.name, "event created");
        Ok(event)
    }

    /// Lists upcoming events plus those of the past grace week, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_current(&self) -> Result<Vec<Event>, ApiError> {
        let cutoff = Utc::now() - Duration::days(LISTING_GRACE_DAYS);
        self.store.list_events_from(cutoff).await
    }

    /// Fetches a single event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when the event does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn fetch_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.store.fetch_event(id).await
    }

    /// Applies a partial update to an event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when the event does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn update_event(&self, id: EventId, update: EventUpdate) -> Result<Event, ApiError> {
        let mut event = self.store.fetch_event(id).await?;
        event.apply_update(update);
        self.store.update_event(&event).await?;
        tracing::info!(event_id = %event.id, "event updated");
        Ok(event)
    }

    /// Returns all reservations of an event enriched with cost and
    /// double-booking information for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when the event does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn reservation_overview(
        &self,
        event_id: EventId,
    ) -> Result<Vec<ReservationOverview>, ApiError> {
        let event = self.store.fetch_event(event_id).await?;
        let reservations = self.store.list_reservations_for_event(event_id).await?;
        let pricing = event.pricing();
        let overview = reservations
            .iter()
            .map(|reservation| ReservationOverview {
                cost: reservation_cost(
                    reservation.people,
                    reservation.tickets_needed,
                    reservation.is_premium,
                    &pricing,
                ),
                double_booking: has_table_collision(reservation, &reservations),
                reservation: reservation.clone(),
            })
            .collect();
        Ok(overview)
    }

    /// Renders the printable guest list of an event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when the event does not exist,
    /// [`ApiError::Pdf`] when rendering fails, or
    /// [`ApiError::Persistence`] on database failure.
    pub async fn guest_list_pdf(&self, event_id: EventId) -> Result<Vec<u8>, ApiError> {
        let event = self.store.fetch_event(event_id).await?;
        let reservations = self.store.list_reservations_for_event(event_id).await?;
        pdf::render_guest_list(&event, &reservations)
    }
}
