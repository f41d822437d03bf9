//! PostgreSQL store for events and reservations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{EventRow, ReservationRow};
use crate::domain::{Event, EventId, Reservation, ReservationId};
use crate::error::ApiError;

const EVENT_COLUMNS: &str = "id, name, date, event_type, minimum_spend, minimum_spend_premium, \
                             ticket_price, ticket_price_premium, minimum_spend_mode, created_at";

const RESERVATION_COLUMNS: &str = "id, event_id, name, email, phone, street_address, city, \
                                   zip_code, people, table_type, tickets_needed, is_premium, \
                                   drink_package, occasion, confirmation_state, payed, \
                                   table_number, notified, payment_reminder_sent, \
                                   cancellation_mail_sent, invoice_path, created_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn insert_event(&self, event: &Event) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO events (id, name, date, event_type, minimum_spend, \
             minimum_spend_premium, ticket_price, ticket_price_premium, minimum_spend_mode, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(event.id.as_uuid())
        .bind(&event.name)
        .bind(event.date)
        .bind(event.event_type.as_str())
        .bind(event.minimum_spend)
        .bind(event.minimum_spend_premium)
        .bind(event.ticket_price)
        .bind(event.ticket_price_premium)
        .bind(event.minimum_spend_mode.as_str())
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Writes back all mutable fields of an event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when no row was updated, or
    /// [`ApiError::Persistence`] on database failure.
    pub async fn update_event(&self, event: &Event) -> Result<(), ApiError> {
        let result = sqlx::query(
            "UPDATE events SET name = $2, date = $3, event_type = $4, minimum_spend = $5, \
             minimum_spend_premium = $6, ticket_price = $7, ticket_price_premium = $8, \
             minimum_spend_mode = $9 WHERE id = $1",
        )
        .bind(event.id.as_uuid())
        .bind(&event.name)
        .bind(event.date)
        .bind(event.event_type.as_str())
        .bind(event.minimum_spend)
        .bind(event.minimum_spend_premium)
        .bind(event.ticket_price)
        .bind(event.ticket_price_premium)
        .bind(event.minimum_spend_mode.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(ApiError::EventNotFound(*event.id.as_uuid()));
        }
        Ok(())
    }

    /// Fetches a single event by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when the event does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn fetch_event(&self, id: EventId) -> Result<Event, ApiError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?
            .ok_or(ApiError::EventNotFound(*id.as_uuid()))?;
        Event::try_from(row)
    }

    /// Lists events with a date at or after the cutoff, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_events_from(&self, cutoff: DateTime<Utc>) -> Result<Vec<Event>, ApiError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE date >= $1 ORDER BY date ASC");
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        rows.into_iter().map(Event::try_from).collect()
    }

    /// Inserts a new reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn insert_reservation(&self, reservation: &Reservation) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO reservations (id, event_id, name, email, phone, street_address, city, \
             zip_code, people, table_type, tickets_needed, is_premium, drink_package, occasion, \
             confirmation_state, payed, table_number, notified, payment_reminder_sent, \
             cancellation_mail_sent, invoice_path, created_at) VALUES ($1, $2, $3, $4, $5, $6, \
             $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)",
        )
        .bind(reservation.id.as_uuid())
        .bind(reservation.event_id.as_uuid())
        .bind(&reservation.name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(&reservation.street_address)
        .bind(&reservation.city)
        .bind(&reservation.zip_code)
        .bind(i32::try_from(reservation.people).unwrap_or(i32::MAX))
        .bind(&reservation.table_type)
        .bind(reservation.tickets_needed)
        .bind(reservation.is_premium)
        .bind(&reservation.drink_package)
        .bind(&reservation.occasion)
        .bind(reservation.confirmation_state.as_str())
        .bind(reservation.payed)
        .bind(&reservation.table_number)
        .bind(reservation.notified)
        .bind(reservation.payment_reminder_sent)
        .bind(reservation.cancellation_mail_sent)
        .bind(&reservation.invoice_path)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Writes back all mutable fields of a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when no row was updated,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn update_reservation(&self, reservation: &Reservation) -> Result<(), ApiError> {
        let result = sqlx::query(
            "UPDATE reservations SET name = $2, email = $3, phone = $4, street_address = $5, \
             city = $6, zip_code = $7, people = $8, table_type = $9, tickets_needed = $10, \
             is_premium = $11, drink_package = $12, occasion = $13, confirmation_state = $14, \
             payed = $15, table_number = $16, notified = $17, payment_reminder_sent = $18, \
             cancellation_mail_sent = $19, invoice_path = $20 WHERE id = $1",
        )
        .bind(reservation.id.as_uuid())
        .bind(&reservation.name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(&reservation.street_address)
        .bind(&reservation.city)
        .bind(&reservation.zip_code)
        .bind(i32::try_from(reservation.people).unwrap_or(i32::MAX))
        .bind(&reservation.table_type)
        .bind(reservation.tickets_needed)
        .bind(reservation.is_premium)
        .bind(&reservation.drink_package)
        .bind(&reservation.occasion)
        .bind(reservation.confirmation_state.as_str())
        .bind(reservation.payed)
        .bind(&reservation.table_number)
        .bind(reservation.notified)
        .bind(reservation.payment_reminder_sent)
        .bind(reservation.cancellation_mail_sent)
        .bind(&reservation.invoice_path)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(ApiError::ReservationNotFound(*reservation.id.as_uuid()));
        }
        Ok(())
    }

    /// Fetches a single reservation by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when it does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn fetch_reservation(&self, id: ReservationId) -> Result<Reservation, ApiError> {
        let query = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?
            .ok_or(ApiError::ReservationNotFound(*id.as_uuid()))?;
        Reservation::try_from(row)
    }

    /// Lists all reservations of an event, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_reservations_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Reservation>, ApiError> {
        let query = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE event_id = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&query)
            .bind(event_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    /// Sets the one-shot decline mail guard after the mail went out.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn set_cancellation_mail_sent(&self, id: ReservationId) -> Result<(), ApiError> {
        sqlx::query("UPDATE reservations SET cancellation_mail_sent = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Stamps the notification timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn set_notified(
        &self,
        id: ReservationId,
        at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        sqlx::query("UPDATE reservations SET notified = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Stamps the payment reminder timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn set_payment_reminder_sent(
        &self,
        id: ReservationId,
        at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        sqlx::query("UPDATE reservations SET payment_reminder_sent = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Records the storage path of an uploaded invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn set_invoice_path(&self, id: ReservationId, path: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE reservations SET invoice_path = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(())
    }
}
