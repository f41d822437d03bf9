//! Event request and response DTOs.
//!
//! Wire names are camelCase, matching what the reservation forms and the
//! admin dashboard send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, EventType, EventUpdate, MinimumSpendMode};

/// Request body for `POST /events`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Display name.
    pub name: String,
    /// Date and boarding time.
    pub date: DateTime<Utc>,
    /// Event line.
    pub event_type: EventType,
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Premium minimum spend, optional.
    #[serde(default)]
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price in euros.
    pub ticket_price: i64,
    /// Premium ticket price, optional.
    #[serde(default)]
    pub ticket_price_premium: Option<i64>,
    /// Minimum spend mode; defaults to per-capita like the old backend.
    #[serde(default = "default_minimum_spend_mode")]
    pub minimum_spend_mode: MinimumSpendMode,
}

const fn default_minimum_spend_mode() -> MinimumSpendMode {
    MinimumSpendMode::PerCapita
}

/// Request body for `PUT /events/{id}`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// New display name.
    pub name: Option<String>,
    /// New date.
    pub date: Option<DateTime<Utc>>,
    /// New event line.
    pub event_type: Option<EventType>,
    /// New base minimum spend.
    pub minimum_spend: Option<i64>,
    /// New premium minimum spend.
    pub minimum_spend_premium: Option<i64>,
    /// New base ticket price.
    pub ticket_price: Option<i64>,
    /// New premium ticket price.
    pub ticket_price_premium: Option<i64>,
    /// New minimum spend mode.
    pub minimum_spend_mode: Option<MinimumSpendMode>,
}

impl From<UpdateEventRequest> for EventUpdate {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            date: req.date,
            event_type: req.event_type,
            minimum_spend: req.minimum_spend,
            minimum_spend_premium: req.minimum_spend_premium,
            ticket_price: req.ticket_price,
            ticket_price_premium: req.ticket_price_premium,
            minimum_spend_mode: req.minimum_spend_mode,
        }
    }
}

/// Event representation returned by all event endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Date and boarding time.
    pub date: DateTime<Utc>,
    /// Event line.
    pub event_type: EventType,
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Premium minimum spend, if defined.
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price in euros.
    pub ticket_price: i64,
    /// Premium ticket price, if defined.
    pub ticket_price_premium: Option<i64>,
    /// Minimum spend mode.
    pub minimum_spend_mode: MinimumSpendMode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: *event.id.as_uuid(),
            name: event.name,
            date: event.date,
            event_type: event.event_type,
            minimum_spend: event.minimum_spend,
            minimum_spend_premium: event.minimum_spend_premium,
            ticket_price: event.ticket_price,
            ticket_price_premium: event.ticket_price_premium,
            minimum_spend_mode: event.minimum_spend_mode,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_mode_to_per_capita() {
        let json = r#"{
            "name": "Weindampfer Sommernacht",
            "date": "2026-09-12T18:00:00Z",
            "eventType": "WEINDAMPFER",
            "minimumSpend": 50,
            "ticketPrice": 30
        }"#;
        let Ok(req) = serde_json::from_str::<CreateEventRequest>(json) else {
            panic!("deserialization failed");
        };
        assert_eq!(req.minimum_spend_mode, MinimumSpendMode::PerCapita);
        assert_eq!(req.minimum_spend_premium, None);
    }

    #[test]
    fn update_request_maps_to_domain_update() {
        let req = UpdateEventRequest {
            minimum_spend: Some(60),
            ..UpdateEventRequest::default()
        };
        let update = EventUpdate::from(req);
        assert_eq!(update.minimum_spend, Some(60));
        assert_eq!(update.name, None);
    }
}
