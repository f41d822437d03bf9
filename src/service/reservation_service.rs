//! Reservation lifecycle: guest submissions, admin updates, guest mail,
//! and invoice handling.

use chrono::Utc;

use crate::domain::{
    ConfirmationState, EventId, Reservation, ReservationForm, ReservationId, ReservationUpdate,
    SideEffect, reservation_cost, validate_reservation,
};
use crate::error::ApiError;
use crate::mailer::{MailAttachment, Mailer, templates};
use crate::persistence::PgStore;
use crate::storage::InvoiceStore;

/// Filename the guest sees on the attached invoice PDF.
const INVOICE_ATTACHMENT_NAME: &str = "Rechnung-Weindampfer.pdf";

/// A guest's reservation request as submitted by the public form.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Guest name.
    pub name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: String,
    /// Street and house number.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Zip code.
    pub zip_code: String,
    /// Guest count.
    pub people: u32,
    /// Seating type.
    pub table_type: String,
    /// Whether boarding tickets are needed.
    pub tickets_needed: bool,
    /// Premium seating tier.
    pub is_premium: bool,
    /// Selected drink package, optional.
    pub drink_package: Option<String>,
    /// Occasion.
    pub occasion: String,
    /// Whether the guest accepted the ARGB terms.
    pub argb_accepted: bool,
}

/// Reservation operations for the public form and the admin backend.
#[derive(Debug, Clone)]
pub struct ReservationService {
    store: PgStore,
    mailer: Mailer,
    invoices: InvoiceStore,
    public_url: String,
}

impl ReservationService {
    /// Creates the service on top of the store, mailer, and invoice store.
    #[must_use]
    pub fn new(store: PgStore, mailer: Mailer, invoices: InvoiceStore, public_url: String) -> Self {
        Self {
            store,
            mailer,
            invoices,
            public_url,
        }
    }

    /// Accepts a guest's reservation request.
    ///
    /// Validates the form against the event line's bounds, stores the
    /// reservation in `REQUESTED` state, and sends the receipt mail to the
    /// guest.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] for an unknown event,
    /// [`ApiError::Validation`] with per-field messages on form errors,
    /// [`ApiError::Mail`] when the receipt mail fails, or
    /// [`ApiError::Persistence`] on database failure.
    pub async fn create(
        &self,
        event_id: EventId,
        new: NewReservation,
    ) -> Result<Reservation, ApiError> {
        let event = self.store.fetch_event(event_id).await?;

        let form = ReservationForm {
            name: &new.name,
            email: &new.email,
            phone: &new.phone,
            street_address: &new.street_address,
            city: &new.city,
            zip_code: &new.zip_code,
            occasion: &new.occasion,
            people: new.people,
            argb_accepted: new.argb_accepted,
        };
        validate_reservation(&form, event.event_type.into()).map_err(ApiError::Validation)?;

        let reservation = Reservation::new_request(
            event_id,
            new.name,
            new.email,
            new.phone,
            new.street_address,
            new.city,
            new.zip_code,
            new.people,
            new.table_type,
            new.tickets_needed,
            new.is_premium,
            new.drink_package,
            new.occasion,
        );
        self.store.insert_reservation(&reservation).await?;
        tracing::info!(
            reservation_id = %reservation.id,
            event_id = %event_id,
            people = reservation.people,
            "reservation requested"
        );

        let mail = templates::request_received(
            &reservation.name,
            reservation.people,
            &templates::format_event_date(event.date),
            event.event_type,
            &self.public_url,
        );
        self.mailer
            .send(&reservation.email, &mail, false, Vec::new())
            .await?;
        Ok(reservation)
    }

    /// Fetches a single reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when it does not exist,
    /// or [`ApiError::Persistence`] on database failure.
    pub async fn fetch(&self, id: ReservationId) -> Result<Reservation, ApiError> {
        self.store.fetch_reservation(id).await
    }

    /// Applies a partial admin update.
    ///
    /// The first transition into `CANCELLED` sends the decline mail and
    /// sets the one-shot guard; every later cancellation is silent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when it does not exist,
    /// [`ApiError::Mail`] when the decline mail fails, or
    /// [`ApiError::Persistence`] on database failure.
    pub async fn update(
        &self,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> Result<Reservation, ApiError> {
        let mut reservation = self.store.fetch_reservation(id).await?;
        let effects = reservation.apply_update(update);
        self.store.update_reservation(&reservation).await?;
        tracing::info!(
            reservation_id = %reservation.id,
            state = reservation.confirmation_state.as_str(),
            "reservation updated"
        );

        for effect in effects {
            match effect {
                SideEffect::SendDeclineMail => {
                    self.send_decline_mail(&mut reservation).await?;
                }
            }
        }
        Ok(reservation)
    }

    /// Sends the confirmation mail with payment data and stamps
    /// `notified`.
    ///
    /// The amount is computed from the owning event's current pricing; a
    /// previously uploaded invoice is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] or
    /// [`ApiError::EventNotFound`] for missing rows, [`ApiError::Mail`]
    /// when sending fails, [`ApiError::Storage`] when the stored invoice
    /// cannot be read, or [`ApiError::Persistence`] on database failure.
    pub async fn notify(&self, id: ReservationId) -> Result<Reservation, ApiError> {
        let mut reservation = self.store.fetch_reservation(id).await?;
        let event = self.store.fetch_event(reservation.event_id).await?;

        let cost = reservation_cost(
            reservation.people,
            reservation.tickets_needed,
            reservation.is_premium,
            &event.pricing(),
        );
        let mail = templates::reservation_confirmed(
            &reservation.name,
            reservation.people,
            &templates::format_event_date(event.date),
            cost.total,
            event.event_type,
            &self.public_url,
        );

        let mut attachments = Vec::new();
        if let Some(path) = &reservation.invoice_path {
            let content = self.invoices.load(path).await?;
            attachments.push(MailAttachment {
                filename: INVOICE_ATTACHMENT_NAME.to_string(),
                content,
                content_type: "application/pdf".to_string(),
            });
        }

        self.mailer
            .send(&reservation.email, &mail, true, attachments)
            .await?;

        let now = Utc::now();
        self.store.set_notified(id, now).await?;
        reservation.notified = Some(now);
        tracing::info!(reservation_id = %id, total = cost.total, "guest notified");
        Ok(reservation)
    }

    /// Sends the payment reminder mail and stamps
    /// `payment_reminder_sent`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] or
    /// [`ApiError::EventNotFound`] for missing rows, [`ApiError::Mail`]
    /// when sending fails, or [`ApiError::Persistence`] on database
    /// failure.
    pub async fn send_payment_reminder(&self, id: ReservationId) -> Result<Reservation, ApiError> {
        let mut reservation = self.store.fetch_reservation(id).await?;
        let event = self.store.fetch_event(reservation.event_id).await?;

        let cost = reservation_cost(
            reservation.people,
            reservation.tickets_needed,
            reservation.is_premium,
            &event.pricing(),
        );
        let mail = templates::payment_reminder(
            &reservation.name,
            reservation.people,
            &templates::format_event_date(event.date),
            cost.total,
            event.event_type,
            &self.public_url,
        );
        self.mailer
            .send(&reservation.email, &mail, true, Vec::new())
            .await?;

        let now = Utc::now();
        self.store.set_payment_reminder_sent(id, now).await?;
        reservation.payment_reminder_sent = Some(now);
        tracing::info!(reservation_id = %id, "payment reminder sent");
        Ok(reservation)
    }

    /// Cancels a reservation with a free-text reason mailed to the guest.
    ///
    /// The cancellation mail honors the same one-shot guard as the
    /// decline mail: if any cancellation mail already went out, the state
    /// change is silent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] or
    /// [`ApiError::EventNotFound`] for missing rows, [`ApiError::Mail`]
    /// when sending fails, or [`ApiError::Persistence`] on database
    /// failure.
    pub async fn cancel(&self, id: ReservationId, reason: &str) -> Result<Reservation, ApiError> {
        let mut reservation = self.store.fetch_reservation(id).await?;
        let event = self.store.fetch_event(reservation.event_id).await?;

        reservation.confirmation_state = ConfirmationState::Cancelled;
        let send_mail = !reservation.cancellation_mail_sent;
        self.store.update_reservation(&reservation).await?;
        tracing::info!(reservation_id = %id, reason, "reservation cancelled");

        if send_mail {
            let mail = templates::reservation_cancelled(
                &reservation.name,
                reservation.people,
                &templates::format_event_date(event.date),
                reason,
                event.event_type,
                &self.public_url,
            );
            self.mailer
                .send(&reservation.email, &mail, true, Vec::new())
                .await?;
            self.store.set_cancellation_mail_sent(id).await?;
            reservation.cancellation_mail_sent = true;
        }
        Ok(reservation)
    }

    /// Stores an uploaded invoice PDF and records its path.
    ///
    /// Re-uploading replaces the previous file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when the reservation does
    /// not exist, [`ApiError::Storage`] when writing fails, or
    /// [`ApiError::Persistence`] on database failure.
    pub async fn store_invoice(
        &self,
        id: ReservationId,
        bytes: &[u8],
    ) -> Result<String, ApiError> {
        // Ensure the reservation exists before touching the filesystem.
        let _ = self.store.fetch_reservation(id).await?;
        let path = self.invoices.save(id, bytes).await?;
        self.store.set_invoice_path(id, &path).await?;
        tracing::info!(reservation_id = %id, path, "invoice stored");
        Ok(path)
    }

    /// Loads the stored invoice PDF of a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] when the reservation does
    /// not exist or has no invoice, [`ApiError::Storage`] when reading
    /// fails, or [`ApiError::Persistence`] on database failure.
    pub async fn invoice_pdf(&self, id: ReservationId) -> Result<Vec<u8>, ApiError> {
        let reservation = self.store.fetch_reservation(id).await?;
        let Some(path) = &reservation.invoice_path else {
            return Err(ApiError::ReservationNotFound(*id.as_uuid()));
        };
        self.invoices.load(path).await
    }

    async fn send_decline_mail(&self, reservation: &mut Reservation) -> Result<(), ApiError> {
        let event = self.store.fetch_event(reservation.event_id).await?;
        let mail = templates::reservation_declined(
            &reservation.name,
            reservation.people,
            &templates::format_event_date(event.date),
            event.event_type,
            &self.public_url,
        );
        self.mailer
            .send(&reservation.email, &mail, true, Vec::new())
            .await?;
        self.store.set_cancellation_mail_sent(reservation.id).await?;
        reservation.cancellation_mail_sent = true;
        tracing::info!(reservation_id = %reservation.id, "decline mail sent");
        Ok(())
    }
}
