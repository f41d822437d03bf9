//! Reservation model and its lifecycle state machine.
//!
//! A reservation is created in [`ConfirmationState::Requested`] and can be
//! moved to `Confirmed` or `Cancelled` by admin updates. No state is
//! terminal: the admin UI may toggle back and forth. The decline email is
//! the one guarded side effect — it is sent at most once, gated by
//! `cancellation_mail_sent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, ReservationId};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationState {
    /// Submitted by the guest, awaiting admin review.
    Requested,
    /// Accepted by the admin.
    Confirmed,
    /// Declined or cancelled by the admin.
    Cancelled,
}

impl ConfirmationState {
    /// Database/string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses the database/string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "REQUESTED" => Some(Self::Requested),
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A table reservation for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Unique identifier.
    pub id: ReservationId,
    /// Owning event.
    pub event_id: EventId,
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
    /// Number of guests (at least 1).
    pub people: u32,
    /// Seating type chosen on the form, e.g. `"Bühne"` or `"Dancefloor"`.
    pub table_type: String,
    /// Whether boarding tickets must be added to the cost.
    pub tickets_needed: bool,
    /// Premium seating tier; premium prices apply when the event defines
    /// them.
    pub is_premium: bool,
    /// Selected drink package, if the event line offers one.
    pub drink_package: Option<String>,
    /// Occasion given by the guest (birthday, company outing, ...).
    pub occasion: String,
    /// Lifecycle state.
    pub confirmation_state: ConfirmationState,
    /// Whether the advance payment has been received.
    pub payed: bool,
    /// Table number assigned by the admin.
    pub table_number: Option<String>,
    /// When the confirmation/payment mail was sent.
    pub notified: Option<DateTime<Utc>>,
    /// When the payment reminder was sent.
    pub payment_reminder_sent: Option<DateTime<Utc>>,
    /// Guard for the one-shot decline email.
    pub cancellation_mail_sent: bool,
    /// Storage path of the uploaded invoice PDF.
    pub invoice_path: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Side effects an update demands from the caller.
///
/// Returned by [`Reservation::apply_update`] so that the guarded
/// transitions stay pure and unit-testable; the service layer performs the
/// actual sending and flag persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// The reservation entered `Cancelled` for the first time; send the
    /// decline email and set `cancellation_mail_sent`.
    SendDeclineMail,
}

/// Partial admin update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReservationUpdate {
    /// New lifecycle state.
    pub confirmation_state: Option<ConfirmationState>,
    /// New table number.
    pub table_number: Option<String>,
    /// New payment flag.
    pub payed: Option<bool>,
    /// New guest name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New street address.
    pub street_address: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New zip code.
    pub zip_code: Option<String>,
    /// New guest count.
    pub people: Option<u32>,
    /// New occasion.
    pub occasion: Option<String>,
    /// New ticket flag.
    pub tickets_needed: Option<bool>,
    /// New seating type.
    pub table_type: Option<String>,
}

impl Reservation {
    /// Creates a fresh reservation in the `Requested` state.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new_request(
        event_id: EventId,
        name: String,
        email: String,
        phone: String,
        street_address: String,
        city: String,
        zip_code: String,
        people: u32,
        table_type: String,
        tickets_needed: bool,
        is_premium: bool,
        drink_package: Option<String>,
        occasion: String,
    ) -> Self {
        Self {
            id: ReservationId::new(),
            event_id,
            name,
            email,
            phone,
            street_address,
            city,
            zip_code,
            people,
            table_type,
            tickets_needed,
            is_premium,
            drink_package,
            occasion,
            confirmation_state: ConfirmationState::Requested,
            payed: false,
            table_number: None,
            notified: None,
            payment_reminder_sent: None,
            cancellation_mail_sent: false,
            invoice_path: None,
            created_at: Utc::now(),
        }
    }

    /// Applies a partial admin update and returns the side effects the
    /// caller must perform.
    ///
    /// Any state may transition to any other. The decline email is
    /// demanded only when this update itself sets `Cancelled` and no
    /// cancellation mail went out yet; updates that merely touch other
    /// fields of an already-cancelled reservation stay silent.
    pub fn apply_update(&mut self, update: ReservationUpdate) -> Vec<SideEffect> {
        let cancelling = update.confirmation_state == Some(ConfirmationState::Cancelled);
        if let Some(state) = update.confirmation_state {
            self.confirmation_state = state;
        }
        if let Some(table_number) = update.table_number {
            self.table_number = Some(table_number);
        }
        if let Some(payed) = update.payed {
            self.payed = payed;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(street_address) = update.street_address {
            self.street_address = street_address;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(zip_code) = update.zip_code {
            self.zip_code = zip_code;
        }
        if let Some(people) = update.people {
            self.people = people;
        }
        if let Some(occasion) = update.occasion {
            self.occasion = occasion;
        }
        if let Some(tickets_needed) = update.tickets_needed {
            self.tickets_needed = tickets_needed;
        }
        if let Some(table_type) = update.table_type {
            self.table_type = table_type;
        }

        let mut effects = Vec::new();
        if cancelling && !self.cancellation_mail_sent {
            effects.push(SideEffect::SendDeclineMail);
        }
        effects
    }
}

/// Linear scan for table-number collisions among confirmed reservations.
///
/// Returns whether another confirmed reservation shares this reservation's
/// non-empty table number. Purely advisory — nothing at the data layer
/// enforces uniqueness, the admin dashboard shows the collision as a
/// warning.
#[must_use]
pub fn has_table_collision(reservation: &Reservation, all: &[Reservation]) -> bool {
    let Some(table_number) = reservation
        .table_number
        .as_deref()
        .filter(|n| !n.is_empty())
    else {
        return false;
    };
    if reservation.confirmation_state != ConfirmationState::Confirmed {
        return false;
    }
    all.iter().any(|other| {
        other.id != reservation.id
            && other.confirmation_state == ConfirmationState::Confirmed
            && other.table_number.as_deref() == Some(table_number)
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_reservation() -> Reservation {
        Reservation::new_request(
            EventId::new(),
            "Maja Berger".to_string(),
            "maja@example.com".to_string(),
            "+49 170 1234567".to_string(),
            "Rheinallee 3".to_string(),
            "Düsseldorf".to_string(),
            "40210".to_string(),
            8,
            "Dancefloor".to_string(),
            true,
            false,
            None,
            "Geburtstag".to_string(),
        )
    }

    #[test]
    fn new_request_starts_requested_and_unflagged() {
        let reservation = make_reservation();
        assert_eq!(
            reservation.confirmation_state,
            ConfirmationState::Requested
        );
        assert!(!reservation.payed);
        assert!(!reservation.cancellation_mail_sent);
        assert!(reservation.notified.is_none());
    }

    #[test]
    fn confirming_produces_no_side_effects() {
        let mut reservation = make_reservation();
        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Confirmed),
            table_number: Some("12".to_string()),
            ..ReservationUpdate::default()
        });
        assert!(effects.is_empty());
        assert_eq!(
            reservation.confirmation_state,
            ConfirmationState::Confirmed
        );
        assert_eq!(reservation.table_number.as_deref(), Some("12"));
    }

    #[test]
    fn first_cancellation_demands_decline_mail() {
        let mut reservation = make_reservation();
        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        assert_eq!(effects, vec![SideEffect::SendDeclineMail]);
    }

    #[test]
    fn cancelling_twice_sends_decline_mail_only_once() {
        let mut reservation = make_reservation();

        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        assert_eq!(effects, vec![SideEffect::SendDeclineMail]);
        // Service layer sends the mail, then persists the flag.
        reservation.cancellation_mail_sent = true;

        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn unrelated_update_on_cancelled_reservation_stays_silent() {
        let mut reservation = make_reservation();
        // Cancelled, but the mail never went out (send failed, flag
        // unset). A later update that does not cancel must not demand
        // the mail.
        let _ = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        assert!(!reservation.cancellation_mail_sent);

        let effects = reservation.apply_update(ReservationUpdate {
            payed: Some(true),
            ..ReservationUpdate::default()
        });
        assert!(effects.is_empty());
        assert!(reservation.payed);
    }

    #[test]
    fn reconfirm_then_cancel_again_stays_one_shot() {
        let mut reservation = make_reservation();
        let _ = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        reservation.cancellation_mail_sent = true;

        // No terminal lock: back to confirmed, then cancelled again.
        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Confirmed),
            ..ReservationUpdate::default()
        });
        assert!(effects.is_empty());
        let effects = reservation.apply_update(ReservationUpdate {
            confirmation_state: Some(ConfirmationState::Cancelled),
            ..ReservationUpdate::default()
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn table_collision_requires_shared_confirmed_number() {
        let mut a = make_reservation();
        a.confirmation_state = ConfirmationState::Confirmed;
        a.table_number = Some("7".to_string());
        let mut b = make_reservation();
        b.confirmation_state = ConfirmationState::Confirmed;
        b.table_number = Some("7".to_string());
        let mut c = make_reservation();
        c.confirmation_state = ConfirmationState::Confirmed;
        c.table_number = Some("9".to_string());

        let all = vec![a.clone(), b.clone(), c.clone()];
        assert!(has_table_collision(&a, &all));
        assert!(has_table_collision(&b, &all));
        assert!(!has_table_collision(&c, &all));
    }

    #[test]
    fn table_collision_ignores_unconfirmed_and_empty_numbers() {
        let mut a = make_reservation();
        a.confirmation_state = ConfirmationState::Confirmed;
        a.table_number = Some("7".to_string());
        let mut b = make_reservation();
        b.confirmation_state = ConfirmationState::Requested;
        b.table_number = Some("7".to_string());
        let mut c = make_reservation();
        c.confirmation_state = ConfirmationState::Confirmed;
        c.table_number = Some(String::new());

        let all = vec![a.clone(), b.clone(), c.clone()];
        assert!(!has_table_collision(&a, &all));
        assert!(!has_table_collision(&b, &all));
        assert!(!has_table_collision(&c, &all));
    }
}
