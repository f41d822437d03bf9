//! German guest mail templates.
//!
//! Each template is a pure render function returning subject, plain text,
//! and HTML, so content can be asserted in tests without any transport.
//! The logo and sign-off differ per event line.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::EventType;

/// Rendered mail content ready for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailContent {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// Formats an event date the way guests see it: `dd.mm.yyyy`.
#[must_use]
pub fn format_event_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn logo_img(event_type: EventType, public_url: &str) -> String {
    match event_type {
        EventType::Weindampfer => format!(
            "<img src=\"{public_url}logo-black.png\" alt=\"Weindampfer Logo\" \
             style=\"max-width:200px; height:auto;\" />"
        ),
        EventType::Jeckeria => format!(
            "<img src=\"{public_url}jeckeria.jpg\" alt=\"Jeckeria Logo\" \
             style=\"max-width:300px; height:auto;\" />"
        ),
    }
}

const fn team_greeting(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Weindampfer => "Dein Weindampfer-Team",
        EventType::Jeckeria => "Dein Jeckeria-Team",
    }
}

/// Wraps a body block in the shared mail frame: logo, heading, content,
/// ARGB footnote (optional), greeting, copyright footer.
fn html_frame(
    event_type: EventType,
    public_url: &str,
    heading: &str,
    body: &str,
    with_argb_note: bool,
) -> String {
    let logo = logo_img(event_type, public_url);
    let greeting = team_greeting(event_type);
    let year = Utc::now().year();
    let argb_note = if with_argb_note {
        format!(
            "<tr><td style=\"padding:0 20px 20px; font-size:12px; font-style:italic; \
             color:#666666;\">Weitere Details findest du in unseren <a href=\"{public_url}argb\" \
             style=\"color:#666666; text-decoration:underline;\">Allgemeinen Reservierungs- und \
             Geschäftsbedingungen</a>.</td></tr>"
        )
    } else {
        String::new()
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head><meta charset=\"UTF-8\"><title>{heading}</title></head>\n\
         <body style=\"margin:0; padding:0; font-family:Arial,sans-serif; background-color:#f9f9f9;\">\n\
         <table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\"><tr><td align=\"center\">\n\
         <table width=\"600\" cellpadding=\"0\" cellspacing=\"0\" style=\"background-color:#ffffff; \
         margin:20px 0; border-radius:8px; overflow:hidden;\">\n\
         <tr><td style=\"padding:20px; text-align:center;\">{logo}</td></tr>\n\
         <tr><td style=\"padding:0 20px 10px;\"><h1 style=\"margin:0; font-size:24px; color:#333333; \
         text-align:center;\">{heading}</h1></td></tr>\n\
         <tr><td style=\"padding:0 20px 20px;\">{body}</td></tr>\n\
         {argb_note}\n\
         <tr><td style=\"padding:0 20px 20px; color:#333333; font-size:14px; line-height:1.5;\">\
         Liebe Grüße<br/>{greeting}</td></tr>\n\
         <tr><td style=\"background-color:#000000; padding:15px; text-align:center;\">\
         <p style=\"margin:0; font-size:12px; color:#ffffff;\">© {year} Weindampfer - Alle Rechte \
         vorbehalten</p></td></tr>\n\
         </table></td></tr></table></body></html>"
    )
}

/// Mail sent to the guest right after the form submission.
#[must_use]
pub fn request_received(
    name: &str,
    people: u32,
    date: &str,
    event_type: EventType,
    public_url: &str,
) -> MailContent {
    let greeting = team_greeting(event_type);
    let text = format!(
        "Hallo {name},\n\ndeine Reservierungsanfrage für {people} Pers. am {date} ist bei uns \
         eingegangen.\nWir überprüfen deine Reservierung und melden uns dann zeitnah bei dir.\n\n\
         Liebe Grüße,\n{greeting}"
    );
    let body = format!(
        "<div style=\"background-color:#f0f0f0; padding:20px; border-radius:5px; color:#333333; \
         font-size:16px; line-height:1.5;\"><p>Hallo <strong>{name}</strong>,</p>\
         <p>deine Reservierungsanfrage für <strong>{people} Personen</strong> am \
         <strong>{date}</strong> ist bei uns eingegangen.</p>\
         <hr style=\"border:none; border-top:1px solid #cccccc; margin:16px 0;\" />\
         <p>Wir überprüfen deine Reservierung und melden uns dann zeitnah bei dir.</p></div>"
    );
    MailContent {
        subject: "Deine Reservierungsanfrage ist eingegangen".to_string(),
        text,
        html: html_frame(
            event_type,
            public_url,
            "Reservierungsanfrage eingegangen",
            &body,
            true,
        ),
    }
}

/// Confirmation mail with payment data; sent when the admin notifies the
/// guest.
#[must_use]
pub fn reservation_confirmed(
    name: &str,
    people: u32,
    date: &str,
    price: i64,
    event_type: EventType,
    public_url: &str,
) -> MailContent {
    let text = format!(
        "Hallo {name},\n\ndeine Reservierung für {people} Pers. am {date} ist bestätigt!\n\
         Bitte überweise {price} € im Voraus auf das unten stehende Konto. Bei Nichtzahlung \
         innerhalb einer Woche verfällt die Reservierung.\n\nLiebe Grüße,\n{greeting}",
        greeting = team_greeting(event_type)
    );
    let body = format!(
        "<div style=\"background-color:#f0f0f0; padding:20px; border-radius:5px; color:#333333; \
         font-size:16px; line-height:1.5;\"><p>Hallo <strong>{name}</strong>,</p>\
         <p>deine Reservierung für <strong>{people} Personen</strong> am <strong>{date}</strong> \
         ist bestätigt!</p>\
         <hr style=\"border:none; border-top:1px solid #cccccc; margin:16px 0;\" />\
         <p><strong>Zahlungsdaten:</strong><br/>Bitte überweise <strong>{price} €</strong> im \
         Voraus auf folgendes Konto:<br/>Name: KM Entertainment GmbH<br/>\
         IBAN: DE49 3016 0213 0088 9520 14<br/>BIC: GENODED1DNE<br/>\
         Verwendungszweck: Tischreservierung {name} / {date}</p>\
         <p style=\"color:#000000; font-weight:bold;\">Zahlung innerhalb einer Woche erforderlich, \
         sonst verfällt die Reservierung.</p></div>"
    );
    MailContent {
        subject: "Deine Reservierung wurde bestätigt".to_string(),
        text,
        html: html_frame(
            event_type,
            public_url,
            "Reservierung bestätigt",
            &body,
            true,
        ),
    }
}

/// Decline mail sent (once) when a request is cancelled by the admin.
#[must_use]
pub fn reservation_declined(
    name: &str,
    people: u32,
    date: &str,
    event_type: EventType,
    public_url: &str,
) -> MailContent {
    let text = format!(
        "Hallo {name},\n\nvielen Dank für deine Reservierungsanfrage für {people} Personen am \
         {date}.\n\nLeider können wir deine Anfrage dieses Mal nicht berücksichtigen, da wir mehr \
         Anfragen erhalten, als wir Plätze zur Verfügung haben.\n\nWir danken dir für dein \
         Verständnis und hoffen, dich trotzdem bald beim Weindampfer begrüßen zu dürfen - \
         vielleicht spontan oder bei einer der kommenden Veranstaltungen.\n\nHerzliche Grüße\n\
         {greeting}",
        greeting = team_greeting(event_type)
    );
    let body = format!(
        "<div style=\"background-color:#f0f0f0; padding:20px; border-radius:5px; color:#333333; \
         font-size:16px; line-height:1.5;\"><p>Hallo <strong>{name}</strong>,</p>\
         <p>vielen Dank für deine Reservierungsanfrage für <strong>{people} Personen</strong> am \
         <strong>{date}</strong>.</p>\
         <p>Leider können wir deine Anfrage dieses Mal nicht berücksichtigen, da wir aktuell mehr \
         Anfragen erhalten, als wir Plätze zur Verfügung haben.</p>\
         <p>Wir danken dir für dein Verständnis und hoffen, dich trotzdem bald begrüßen zu dürfen \
         - vielleicht spontan oder bei einer unserer nächsten Veranstaltungen.</p></div>"
    );
    MailContent {
        subject: "Deine Reservierungsanfrage beim Weindampfer".to_string(),
        text,
        html: html_frame(
            event_type,
            public_url,
            "Reservierungsanfrage",
            &body,
            false,
        ),
    }
}

/// Cancellation mail with a free-text reason, for reservations cancelled
/// after being confirmed.
#[must_use]
pub fn reservation_cancelled(
    name: &str,
    people: u32,
    date: &str,
    reason: &str,
    event_type: EventType,
    public_url: &str,
) -> MailContent {
    let text = format!(
        "Hallo {name}, leider müssen wir deine Reservierung für {people} Personen am {date} \
         stornieren. Grund: {reason}. Wir hoffen, dich dennoch bald begrüßen zu dürfen. \
         Liebe Grüße, {greeting}",
        greeting = team_greeting(event_type)
    );
    let body = format!(
        "<div style=\"background-color:#fdecea; padding:20px; border-radius:5px; color:#333333; \
         font-size:16px; line-height:1.5;\"><p>Hallo <strong>{name}</strong>,</p>\
         <p>leider müssen wir deine Reservierung für <strong>{people} Personen</strong> am \
         <strong>{date} stornieren</strong>.</p>\
         <hr style=\"border:none; border-top:1px solid #ffcccc; margin:16px 0;\" />\
         <p><strong>Grund der Stornierung:</strong><br/>{reason}</p></div>"
    );
    MailContent {
        subject: "Deine Weindampfer-Reservierung wurde storniert".to_string(),
        text,
        html: html_frame(
            event_type,
            public_url,
            "Reservierung storniert",
            &body,
            false,
        ),
    }
}

/// Reminder mail for confirmed reservations with an outstanding advance
/// payment.
#[must_use]
pub fn payment_reminder(
    name: &str,
    people: u32,
    date: &str,
    price: i64,
    event_type: EventType,
    public_url: &str,
) -> MailContent {
    let text = format!(
        "Hallo {name},\n\nwir haben für deine Reservierung für {people} Pers. am {date} noch \
         keinen Zahlungseingang über {price} € feststellen können.\nBitte überweise den Betrag \
         zeitnah, damit deine Reservierung bestehen bleibt.\n\nLiebe Grüße,\n{greeting}",
        greeting = team_greeting(event_type)
    );
    let body = format!(
        "<div style=\"background-color:#f0f0f0; padding:20px; border-radius:5px; color:#333333; \
         font-size:16px; line-height:1.5;\"><p>Hallo <strong>{name}</strong>,</p>\
         <p>wir haben für deine Reservierung für <strong>{people} Personen</strong> am \
         <strong>{date}</strong> noch keinen Zahlungseingang über <strong>{price} €</strong> \
         feststellen können.</p>\
         <hr style=\"border:none; border-top:1px solid #cccccc; margin:16px 0;\" />\
         <p>Bitte überweise den Betrag zeitnah, damit deine Reservierung bestehen bleibt. Die \
         Zahlungsdaten findest du in deiner Bestätigungsmail.</p></div>"
    );
    MailContent {
        subject: "Erinnerung: Zahlung für deine Reservierung".to_string(),
        text,
        html: html_frame(event_type, public_url, "Zahlungserinnerung", &body, true),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const PUBLIC_URL: &str = "https://weindampfer.example/";

    #[test]
    fn event_date_is_german_format() {
        let date = DateTime::parse_from_rfc3339("2026-09-12T18:00:00Z")
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| panic!("valid date"));
        assert_eq!(format_event_date(date), "12.09.2026");
    }

    #[test]
    fn request_received_mentions_guest_and_date() {
        let mail = request_received("Maja", 8, "12.09.2026", EventType::Weindampfer, PUBLIC_URL);
        assert_eq!(mail.subject, "Deine Reservierungsanfrage ist eingegangen");
        assert!(mail.text.contains("Hallo Maja"));
        assert!(mail.text.contains("8 Pers."));
        assert!(mail.html.contains("12.09.2026"));
        assert!(mail.html.contains("logo-black.png"));
        assert!(mail.html.contains("Dein Weindampfer-Team"));
    }

    #[test]
    fn jeckeria_mails_use_their_own_branding() {
        let mail = request_received("Maja", 8, "12.09.2026", EventType::Jeckeria, PUBLIC_URL);
        assert!(mail.html.contains("jeckeria.jpg"));
        assert!(mail.html.contains("Dein Jeckeria-Team"));
        assert!(!mail.html.contains("logo-black.png"));
    }

    #[test]
    fn confirmation_includes_price_and_bank_details() {
        let mail = reservation_confirmed(
            "Maja",
            10,
            "12.09.2026",
            800,
            EventType::Weindampfer,
            PUBLIC_URL,
        );
        assert!(mail.text.contains("800 €"));
        assert!(mail.html.contains("IBAN: DE49 3016 0213 0088 9520 14"));
        assert!(mail.html.contains("Verwendungszweck: Tischreservierung Maja / 12.09.2026"));
        assert!(mail.html.contains(&format!("{PUBLIC_URL}argb")));
    }

    #[test]
    fn cancellation_carries_the_reason() {
        let mail = reservation_cancelled(
            "Maja",
            8,
            "12.09.2026",
            "Schiff in der Werft",
            EventType::Weindampfer,
            PUBLIC_URL,
        );
        assert!(mail.text.contains("Grund: Schiff in der Werft"));
        assert!(mail.html.contains("Grund der Stornierung:"));
        assert!(mail.html.contains("Schiff in der Werft"));
    }

    #[test]
    fn reminder_mentions_outstanding_amount() {
        let mail = payment_reminder(
            "Maja",
            10,
            "12.09.2026",
            800,
            EventType::Weindampfer,
            PUBLIC_URL,
        );
        assert!(mail.text.contains("800 €"));
        assert!(mail.subject.contains("Zahlung"));
    }
}
