//! Event model: the bookable boat evenings and their pricing configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;

/// The two event lines of the business, each with its own branding,
/// seating types and premium upsells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// The classic wine-steamer evenings.
    Weindampfer,
    /// The carnival party line; group reservations only.
    Jeckeria,
}

impl EventType {
    /// Database/string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weindampfer => "WEINDAMPFER",
            Self::Jeckeria => "JECKERIA",
        }
    }

    /// Parses the database/string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WEINDAMPFER" => Some(Self::Weindampfer),
            "JECKERIA" => Some(Self::Jeckeria),
            _ => None,
        }
    }
}

/// Whether the minimum spend is charged per guest or once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MinimumSpendMode {
    /// Minimum spend is multiplied by the number of guests.
    PerCapita,
    /// Minimum spend is a flat amount per table.
    PerTable,
}

impl MinimumSpendMode {
    /// Database/string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PerCapita => "PerCapita",
            Self::PerTable => "PerTable",
        }
    }

    /// Parses the database/string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PerCapita" => Some(Self::PerCapita),
            "PerTable" => Some(Self::PerTable),
            _ => None,
        }
    }
}

/// A single bookable evening.
///
/// Prices are whole euros. The premium fields only apply to reservations
/// flagged as premium seating and fall back to the base rates when unset
/// (see [`super::pricing`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Display name, e.g. `"Weindampfer Sommernacht"`.
    pub name: String,
    /// Date and boarding time of the evening.
    pub date: DateTime<Utc>,
    /// Which event line this evening belongs to.
    pub event_type: EventType,
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Minimum spend for premium tables, if the evening offers one.
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price per person in euros.
    pub ticket_price: i64,
    /// Ticket price for premium tables, if the evening offers one.
    pub ticket_price_premium: Option<i64>,
    /// How the minimum spend is applied.
    pub minimum_spend_mode: MinimumSpendMode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Snapshot of an event's pricing fields, taken at computation time.
///
/// Reservations never cache a price; every cost computation reads the
/// owning event's current configuration through this view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPricing {
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Premium minimum spend, when defined.
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price per person in euros.
    pub ticket_price: i64,
    /// Premium ticket price, when defined.
    pub ticket_price_premium: Option<i64>,
    /// How the minimum spend is applied.
    pub minimum_spend_mode: MinimumSpendMode,
}

impl Event {
    /// Returns the current pricing configuration of this event.
    #[must_use]
    pub const fn pricing(&self) -> EventPricing {
        EventPricing {
            minimum_spend: self.minimum_spend,
            minimum_spend_premium: self.minimum_spend_premium,
            ticket_price: self.ticket_price,
            ticket_price_premium: self.ticket_price_premium,
            minimum_spend_mode: self.minimum_spend_mode,
        }
    }

    /// Full display name including the German-formatted date,
    /// e.g. `"Weindampfer Sommernacht - 12.09.2026"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} - {}", self.name, self.date.format("%d.%m.%Y"))
    }
}

/// Partial update applied by the admin backend; `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
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

impl Event {
    /// Applies a partial update in place.
    pub fn apply_update(&mut self, update: EventUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(event_type) = update.event_type {
            self.event_type = event_type;
        }
        if let Some(minimum_spend) = update.minimum_spend {
            self.minimum_spend = minimum_spend;
        }
        if let Some(premium) = update.minimum_spend_premium {
            self.minimum_spend_premium = Some(premium);
        }
        if let Some(ticket_price) = update.ticket_price {
            self.ticket_price = ticket_price;
        }
        if let Some(premium) = update.ticket_price_premium {
            self.ticket_price_premium = Some(premium);
        }
        if let Some(mode) = update.minimum_spend_mode {
            self.minimum_spend_mode = mode;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_event() -> Event {
        Event {
            id: EventId::new(),
            name: "Weindampfer Sommernacht".to_string(),
            date: DateTime::parse_from_rfc3339("2026-09-12T18:00:00Z")
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(|_| panic!("valid date")),
            event_type: EventType::Weindampfer,
            minimum_spend: 50,
            minimum_spend_premium: None,
            ticket_price: 30,
            ticket_price_premium: None,
            minimum_spend_mode: MinimumSpendMode::PerCapita,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn enum_string_round_trips() {
        for t in [EventType::Weindampfer, EventType::Jeckeria] {
            assert_eq!(EventType::parse(t.as_str()), Some(t));
        }
        for m in [MinimumSpendMode::PerCapita, MinimumSpendMode::PerTable] {
            assert_eq!(MinimumSpendMode::parse(m.as_str()), Some(m));
        }
        assert_eq!(EventType::parse("KARNEVAL"), None);
        assert_eq!(MinimumSpendMode::parse("PerGroup"), None);
    }

    #[test]
    fn serde_uses_original_wire_names() {
        let json = serde_json::to_string(&EventType::Weindampfer).ok();
        assert_eq!(json.as_deref(), Some("\"WEINDAMPFER\""));
        let json = serde_json::to_string(&MinimumSpendMode::PerCapita).ok();
        assert_eq!(json.as_deref(), Some("\"PerCapita\""));
    }

    #[test]
    fn full_name_formats_german_date() {
        let event = make_event();
        assert_eq!(event.full_name(), "Weindampfer Sommernacht - 12.09.2026");
    }

    #[test]
    fn apply_update_changes_only_given_fields() {
        let mut event = make_event();
        event.apply_update(EventUpdate {
            minimum_spend: Some(60),
            minimum_spend_premium: Some(90),
            ..EventUpdate::default()
        });
        assert_eq!(event.minimum_spend, 60);
        assert_eq!(event.minimum_spend_premium, Some(90));
        assert_eq!(event.name, "Weindampfer Sommernacht");
        assert_eq!(event.ticket_price, 30);
    }

    #[test]
    fn pricing_snapshot_matches_event() {
        let event = make_event();
        let pricing = event.pricing();
        assert_eq!(pricing.minimum_spend, event.minimum_spend);
        assert_eq!(pricing.minimum_spend_mode, event.minimum_spend_mode);
    }
}
