//! Reservation request and response DTOs.
//!
//! Wire names are camelCase, matching the field keys the reservation forms
//! and the validation error map use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ConfirmationState, CostBreakdown, Reservation, ReservationUpdate};
use crate::service::{NewReservation, ReservationOverview};

/// Request body for `POST /reservations` (the public form).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Target event.
    pub event_id: uuid::Uuid,
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
    #[serde(default)]
    pub is_premium: bool,
    /// Selected drink package, optional.
    #[serde(default)]
    pub drink_package: Option<String>,
    /// Occasion.
    pub occasion: String,
    /// Whether the guest accepted the ARGB terms.
    #[serde(default)]
    pub argb_accepted: bool,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            street_address: req.street_address,
            city: req.city,
            zip_code: req.zip_code,
            people: req.people,
            table_type: req.table_type,
            tickets_needed: req.tickets_needed,
            is_premium: req.is_premium,
            drink_package: req.drink_package,
            occasion: req.occasion,
            argb_accepted: req.argb_accepted,
        }
    }
}

/// Request body for `PUT /reservations/{id}` (admin); absent fields stay
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
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

impl From<UpdateReservationRequest> for ReservationUpdate {
    fn from(req: UpdateReservationRequest) -> Self {
        Self {
            confirmation_state: req.confirmation_state,
            table_number: req.table_number,
            payed: req.payed,
            name: req.name,
            email: req.email,
            phone: req.phone,
            street_address: req.street_address,
            city: req.city,
            zip_code: req.zip_code,
            people: req.people,
            occasion: req.occasion,
            tickets_needed: req.tickets_needed,
            table_type: req.table_type,
        }
    }
}

/// Request body for `POST /reservations/{id}/cancel`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CancelReservationRequest {
    /// Free-text reason forwarded to the guest.
    pub reason: String,
}

/// Reservation representation returned by all reservation endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    /// Unique identifier.
    pub id: uuid::Uuid,
    /// Owning event.
    pub event_id: uuid::Uuid,
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
    /// Selected drink package, if any.
    pub drink_package: Option<String>,
    /// Occasion.
    pub occasion: String,
    /// Lifecycle state.
    pub confirmation_state: ConfirmationState,
    /// Whether the advance payment has been received.
    pub payed: bool,
    /// Assigned table number, if any.
    pub table_number: Option<String>,
    /// When the confirmation mail was sent, if ever.
    pub notified: Option<DateTime<Utc>>,
    /// When the payment reminder was sent, if ever.
    pub payment_reminder_sent: Option<DateTime<Utc>>,
    /// Whether a cancellation/decline mail already went out.
    pub cancellation_mail_sent: bool,
    /// Whether an invoice PDF has been uploaded.
    pub has_invoice: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: *reservation.id.as_uuid(),
            event_id: *reservation.event_id.as_uuid(),
            name: reservation.name,
            email: reservation.email,
            phone: reservation.phone,
            street_address: reservation.street_address,
            city: reservation.city,
            zip_code: reservation.zip_code,
            people: reservation.people,
            table_type: reservation.table_type,
            tickets_needed: reservation.tickets_needed,
            is_premium: reservation.is_premium,
            drink_package: reservation.drink_package,
            occasion: reservation.occasion,
            confirmation_state: reservation.confirmation_state,
            payed: reservation.payed,
            table_number: reservation.table_number,
            notified: reservation.notified,
            payment_reminder_sent: reservation.payment_reminder_sent,
            cancellation_mail_sent: reservation.cancellation_mail_sent,
            has_invoice: reservation.invoice_path.is_some(),
            created_at: reservation.created_at,
        }
    }
}

/// A reservation row on the admin dashboard: the reservation plus its
/// derived cost and the double-booking warning.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationOverviewResponse {
    /// The reservation.
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    /// Cost computed from the event's current pricing.
    pub cost: CostBreakdown,
    /// Whether another confirmed reservation holds the same table number.
    pub double_booking: bool,
}

impl From<ReservationOverview> for ReservationOverviewResponse {
    fn from(overview: ReservationOverview) -> Self {
        Self {
            reservation: overview.reservation.into(),
            cost: overview.cost,
            double_booking: overview.double_booking,
        }
    }
}

/// Response for `POST /reservations/{id}/invoice`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUploadResponse {
    /// Relative storage path of the invoice.
    pub invoice_path: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventId;

    #[test]
    fn create_request_defaults_optional_flags() {
        let json = r#"{
            "eventId": "7f1a2f36-98e9-4a39-9e53-5a1dd4a4f001",
            "name": "Maja Berger",
            "email": "maja@example.com",
            "phone": "+49 170 1234567",
            "streetAddress": "Rheinallee 3",
            "city": "Düsseldorf",
            "zipCode": "40210",
            "people": 8,
            "tableType": "Dancefloor",
            "ticketsNeeded": true,
            "occasion": "Geburtstag"
        }"#;
        let Ok(req) = serde_json::from_str::<CreateReservationRequest>(json) else {
            panic!("deserialization failed");
        };
        assert!(!req.is_premium);
        assert!(!req.argb_accepted);
        assert_eq!(req.drink_package, None);
    }

    #[test]
    fn response_flags_invoice_presence_without_leaking_the_path() {
        let mut reservation = Reservation::new_request(
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
        );
        reservation.invoice_path = Some("reservations/x.pdf".to_string());
        let response = ReservationResponse::from(reservation);
        assert!(response.has_invoice);
        let Ok(json) = serde_json::to_string(&response) else {
            panic!("serialization failed");
        };
        assert!(!json.contains("reservations/x.pdf"));
        assert!(json.contains("\"hasInvoice\":true"));
    }
}
