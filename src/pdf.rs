//! Guest-list PDF export for the door staff.
//!
//! Renders the confirmed reservations of an event as an A4 table with
//! columns for name, guest count, table number, and a check-in box, sorted
//! by table number.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::domain::{ConfirmationState, Event, Reservation};
use crate::error::ApiError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 10.0;

// Column widths as fractions of the printable width, matching the old
// guest-list layout.
const COLUMN_FRACTIONS: [f32; 4] = [0.48, 0.15, 0.20, 0.17];
const HEADERS: [&str; 4] = ["Name", "Personen", "Tischnummer", "Eingecheckt"];

/// Renders the guest list for an event.
///
/// Only confirmed reservations appear; rows are sorted by table number
/// (unassigned tables first).
///
/// # Errors
///
/// Returns [`ApiError::Pdf`] when document assembly fails.
pub fn render_guest_list(event: &Event, reservations: &[Reservation]) -> Result<Vec<u8>, ApiError> {
    let mut confirmed: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.confirmation_state == ConfirmationState::Confirmed)
        .collect();
    confirmed.sort_by(|a, b| {
        a.table_number
            .as_deref()
            .unwrap_or("")
            .cmp(b.table_number.as_deref().unwrap_or(""))
    });

    let title = format!("Gästeliste {}", event.full_name());
    let (doc, first_page, first_layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "guest-list");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ApiError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ApiError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(&title, 18.0, Mm(MARGIN), Mm(PAGE_HEIGHT - 30.0), &bold);

    let mut y = PAGE_HEIGHT - 50.0;
    draw_header_row(&layer, &bold, y);
    y -= ROW_HEIGHT;

    for reservation in confirmed {
        if y < MARGIN + ROW_HEIGHT {
            let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "guest-list");
            layer = doc.get_page(page).get_layer(layer_index);
            y = PAGE_HEIGHT - 30.0;
            draw_header_row(&layer, &bold, y);
            y -= ROW_HEIGHT;
        }
        draw_rule(&layer, y + ROW_HEIGHT - 2.0);
        let people = reservation.people.to_string();
        let cells = [
            reservation.name.as_str(),
            people.as_str(),
            reservation.table_number.as_deref().unwrap_or(""),
            "",
        ];
        draw_row(&layer, &font, y, &cells);
        y -= ROW_HEIGHT;
    }
    draw_rule(&layer, y + ROW_HEIGHT - 2.0);

    doc.save_to_bytes().map_err(|e| ApiError::Pdf(e.to_string()))
}

fn column_offsets() -> [f32; 4] {
    let printable = PAGE_WIDTH - 2.0 * MARGIN;
    let mut offsets = [0.0; 4];
    let mut x = MARGIN;
    for (offset, fraction) in offsets.iter_mut().zip(COLUMN_FRACTIONS) {
        *offset = x;
        x += printable * fraction;
    }
    offsets
}

fn draw_header_row(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (header, x) in HEADERS.iter().zip(column_offsets()) {
        layer.use_text(*header, 12.0, Mm(x), Mm(y), bold);
    }
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32, cells: &[&str; 4]) {
    for (cell, x) in cells.iter().zip(column_offsets()) {
        if !cell.is_empty() {
            layer.use_text(*cell, 11.0, Mm(x), Mm(y), font);
        }
    }
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.set_outline_thickness(0.4);
    layer.add_line(line);
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventId, EventType, MinimumSpendMode};
    use chrono::Utc;

    fn make_event() -> Event {
        Event {
            id: EventId::new(),
            name: "Weindampfer Sommernacht".to_string(),
            date: Utc::now(),
            event_type: EventType::Weindampfer,
            minimum_spend: 50,
            minimum_spend_premium: None,
            ticket_price: 30,
            ticket_price_premium: None,
            minimum_spend_mode: MinimumSpendMode::PerCapita,
            created_at: Utc::now(),
        }
    }

    fn confirmed(name: &str, table: Option<&str>) -> Reservation {
        let mut reservation = Reservation::new_request(
            EventId::new(),
            name.to_string(),
            "guest@example.com".to_string(),
            "0".to_string(),
            "Straße 1".to_string(),
            "Stadt".to_string(),
            "12345".to_string(),
            4,
            "Dancefloor".to_string(),
            false,
            false,
            None,
            "Anlass".to_string(),
        );
        reservation.confirmation_state = ConfirmationState::Confirmed;
        reservation.table_number = table.map(str::to_string);
        reservation
    }

    #[test]
    fn renders_nonempty_pdf() {
        let event = make_event();
        let reservations = vec![
            confirmed("Berger", Some("3")),
            confirmed("Adam", Some("1")),
            confirmed("Cord", None),
        ];
        let Ok(bytes) = render_guest_list(&event, &reservations) else {
            panic!("render failed");
        };
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn unconfirmed_reservations_are_excluded() {
        let event = make_event();
        let mut requested = confirmed("Pending", Some("9"));
        requested.confirmation_state = ConfirmationState::Requested;
        // Renders fine with nothing but the header.
        let Ok(bytes) = render_guest_list(&event, &[requested]) else {
            panic!("render failed");
        };
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn many_rows_paginate() {
        let event = make_event();
        let reservations: Vec<Reservation> = (0..80)
            .map(|i| confirmed(&format!("Gast {i}"), Some(&format!("{i}"))))
            .collect();
        assert!(render_guest_list(&event, &reservations).is_ok());
    }
}
