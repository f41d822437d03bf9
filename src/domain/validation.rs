//! Server-side validation of the public reservation form.
//!
//! Mirrors the checks the reservation forms run on submit: required fields,
//! email shape, guest count bounds per event line, and the ARGB terms
//! checkbox. Failures are collected per field so the form can display them
//! next to the offending input.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::event::EventType;

/// Per-field validation errors, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Records an error message for a field.
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    /// Returns `true` when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Allowed guest count range for an event line.
///
/// Jeckeria evenings take group reservations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeopleBounds {
    /// Minimum guest count, inclusive.
    pub min: u32,
    /// Maximum guest count, inclusive.
    pub max: u32,
}

impl From<EventType> for PeopleBounds {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Weindampfer => Self { min: 1, max: 25 },
            EventType::Jeckeria => Self { min: 6, max: 25 },
        }
    }
}

/// The guest-supplied form fields subject to validation.
#[derive(Debug, Clone, Copy)]
pub struct ReservationForm<'a> {
    /// Guest name.
    pub name: &'a str,
    /// Guest email address.
    pub email: &'a str,
    /// Guest phone number.
    pub phone: &'a str,
    /// Street and house number.
    pub street_address: &'a str,
    /// City.
    pub city: &'a str,
    /// Zip code.
    pub zip_code: &'a str,
    /// Occasion.
    pub occasion: &'a str,
    /// Guest count.
    pub people: u32,
    /// Whether the guest accepted the ARGB terms.
    pub argb_accepted: bool,
}

/// Checks an email address the way the forms do:
/// `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Validates a reservation form against the bounds of the target event
/// line.
///
/// # Errors
///
/// Returns the collected per-field messages (German, as shown to guests)
/// when any check fails.
pub fn validate_reservation(
    form: &ReservationForm<'_>,
    bounds: PeopleBounds,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if form.email.is_empty() {
        errors.insert("email", "E-Mail darf nicht leer sein");
    } else if !is_valid_email(form.email) {
        errors.insert("email", "Ungültige E-Mail-Adresse");
    }
    if form.people < bounds.min || form.people > bounds.max {
        let message = format!(
            "Anzahl muss zwischen {} und {} liegen",
            bounds.min, bounds.max
        );
        errors.insert("people", &message);
    }
    if form.name.is_empty() {
        errors.insert("name", "Name darf nicht leer sein");
    }
    if form.occasion.is_empty() {
        errors.insert("occasion", "Anlass darf nicht leer sein");
    }
    if form.phone.is_empty() {
        errors.insert("phone", "Telefonnummer darf nicht leer sein");
    }
    if form.street_address.is_empty() {
        errors.insert(
            "streetAddress",
            "Straße und Hausnummer dürfen nicht leer sein",
        );
    }
    if form.city.is_empty() {
        errors.insert("city", "Stadt darf nicht leer sein");
    }
    if form.zip_code.is_empty() {
        errors.insert("zipCode", "Postleitzahl darf nicht leer sein");
    }
    if !form.argb_accepted {
        errors.insert("argbAccepted", "Bitte bestätige die ARGB-Bedingungen");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn valid_form() -> ReservationForm<'static> {
        ReservationForm {
            name: "Maja Berger",
            email: "maja@example.com",
            phone: "+49 170 1234567",
            street_address: "Rheinallee 3",
            city: "Düsseldorf",
            zip_code: "40210",
            occasion: "Geburtstag",
            people: 8,
            argb_accepted: true,
        }
    }

    #[test]
    fn valid_form_passes_both_event_lines() {
        let form = valid_form();
        assert!(validate_reservation(&form, EventType::Weindampfer.into()).is_ok());
        assert!(validate_reservation(&form, EventType::Jeckeria.into()).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.de"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("nodot@example"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
    }

    #[test]
    fn empty_fields_are_reported_per_field() {
        let form = ReservationForm {
            name: "",
            email: "",
            phone: "",
            street_address: "",
            city: "",
            zip_code: "",
            occasion: "",
            people: 8,
            argb_accepted: false,
        };
        let Err(errors) = validate_reservation(&form, EventType::Weindampfer.into()) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("name"), Some("Name darf nicht leer sein"));
        assert_eq!(errors.get("email"), Some("E-Mail darf nicht leer sein"));
        assert_eq!(
            errors.get("phone"),
            Some("Telefonnummer darf nicht leer sein")
        );
        assert_eq!(
            errors.get("streetAddress"),
            Some("Straße und Hausnummer dürfen nicht leer sein")
        );
        assert_eq!(errors.get("city"), Some("Stadt darf nicht leer sein"));
        assert_eq!(
            errors.get("zipCode"),
            Some("Postleitzahl darf nicht leer sein")
        );
        assert_eq!(
            errors.get("argbAccepted"),
            Some("Bitte bestätige die ARGB-Bedingungen")
        );
    }

    #[test]
    fn malformed_email_gets_its_own_message() {
        let form = ReservationForm {
            email: "not-an-email",
            ..valid_form()
        };
        let Err(errors) = validate_reservation(&form, EventType::Weindampfer.into()) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("email"), Some("Ungültige E-Mail-Adresse"));
    }

    #[test]
    fn people_bounds_depend_on_event_line() {
        let form = ReservationForm {
            people: 2,
            ..valid_form()
        };
        // Two guests are fine on the Weindampfer but below the Jeckeria
        // group minimum.
        assert!(validate_reservation(&form, EventType::Weindampfer.into()).is_ok());
        let Err(errors) = validate_reservation(&form, EventType::Jeckeria.into()) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("people"),
            Some("Anzahl muss zwischen 6 und 25 liegen")
        );

        let form = ReservationForm {
            people: 26,
            ..valid_form()
        };
        assert!(validate_reservation(&form, EventType::Weindampfer.into()).is_err());

        let form = ReservationForm {
            people: 0,
            ..valid_form()
        };
        assert!(validate_reservation(&form, EventType::Weindampfer.into()).is_err());
    }
}
