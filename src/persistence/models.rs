//! Database row models for events and reservations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    ConfirmationState, Event, EventId, EventType, MinimumSpendMode, Reservation, ReservationId,
};
use crate::error::ApiError;

/// A row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Event date.
    pub date: DateTime<Utc>,
    /// Event line discriminator (`WEINDAMPFER` / `JECKERIA`).
    pub event_type: String,
    /// Base minimum spend in euros.
    pub minimum_spend: i64,
    /// Premium minimum spend, nullable.
    pub minimum_spend_premium: Option<i64>,
    /// Base ticket price in euros.
    pub ticket_price: i64,
    /// Premium ticket price, nullable.
    pub ticket_price_premium: Option<i64>,
    /// Minimum spend mode (`PerCapita` / `PerTable`).
    pub minimum_spend_mode: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = ApiError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let event_type = EventType::parse(&row.event_type)
            .ok_or_else(|| ApiError::Persistence(format!("unknown event_type: {}", row.event_type)))?;
        let minimum_spend_mode = MinimumSpendMode::parse(&row.minimum_spend_mode).ok_or_else(|| {
            ApiError::Persistence(format!(
                "unknown minimum_spend_mode: {}",
                row.minimum_spend_mode
            ))
        })?;
        Ok(Self {
            id: EventId::from_uuid(row.id),
            name: row.name,
            date: row.date,
            event_type,
            minimum_spend: row.minimum_spend,
            minimum_spend_premium: row.minimum_spend_premium,
            ticket_price: row.ticket_price,
            ticket_price_premium: row.ticket_price_premium,
            minimum_spend_mode,
            created_at: row.created_at,
        })
    }
}

/// A row from the `reservations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReservationRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Guest name.
    pub name: String,
    /// Guest email.
    pub email: String,
    /// Guest phone.
    pub phone: String,
    /// Street and house number.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Zip code.
    pub zip_code: String,
    /// Guest count.
    pub people: i32,
    /// Seating type.
    pub table_type: String,
    /// Whether tickets are needed.
    pub tickets_needed: bool,
    /// Premium seating tier.
    pub is_premium: bool,
    /// Selected drink package, nullable.
    pub drink_package: Option<String>,
    /// Occasion.
    pub occasion: String,
    /// Lifecycle state discriminator.
    pub confirmation_state: String,
    /// Payment flag.
    pub payed: bool,
    /// Assigned table number, nullable.
    pub table_number: Option<String>,
    /// Notification timestamp, nullable.
    pub notified: Option<DateTime<Utc>>,
    /// Payment reminder timestamp, nullable.
    pub payment_reminder_sent: Option<DateTime<Utc>>,
    /// One-shot decline mail guard.
    pub cancellation_mail_sent: bool,
    /// Invoice storage path, nullable.
    pub invoice_path: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = ApiError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let confirmation_state =
            ConfirmationState::parse(&row.confirmation_state).ok_or_else(|| {
                ApiError::Persistence(format!(
                    "unknown confirmation_state: {}",
                    row.confirmation_state
                ))
            })?;
        let people = u32::try_from(row.people)
            .map_err(|_| ApiError::Persistence(format!("negative people count: {}", row.people)))?;
        Ok(Self {
            id: ReservationId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            street_address: row.street_address,
            city: row.city,
            zip_code: row.zip_code,
            people,
            table_type: row.table_type,
            tickets_needed: row.tickets_needed,
            is_premium: row.is_premium,
            drink_package: row.drink_package,
            occasion: row.occasion,
            confirmation_state,
            payed: row.payed,
            table_number: row.table_number,
            notified: row.notified,
            payment_reminder_sent: row.payment_reminder_sent,
            cancellation_mail_sent: row.cancellation_mail_sent,
            invoice_path: row.invoice_path,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_event_row() -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            name: "Weindampfer Sommernacht".to_string(),
            date: Utc::now(),
            event_type: "WEINDAMPFER".to_string(),
            minimum_spend: 50,
            minimum_spend_premium: None,
            ticket_price: 30,
            ticket_price_premium: Some(45),
            minimum_spend_mode: "PerCapita".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn event_row_converts_to_domain() {
        let row = make_event_row();
        let Ok(event) = Event::try_from(row) else {
            panic!("conversion failed");
        };
        assert_eq!(event.event_type, EventType::Weindampfer);
        assert_eq!(event.minimum_spend_mode, MinimumSpendMode::PerCapita);
        assert_eq!(event.ticket_price_premium, Some(45));
    }

    #[test]
    fn unknown_discriminators_are_persistence_errors() {
        let mut row = make_event_row();
        row.event_type = "KARNEVAL".to_string();
        assert!(Event::try_from(row).is_err());

        let mut row = make_event_row();
        row.minimum_spend_mode = "PerGroup".to_string();
        assert!(Event::try_from(row).is_err());
    }
}
