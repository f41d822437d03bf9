//! Event handlers: creation, listing, updates, admin overview, and the
//! printable guest list.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventRequest, EventResponse, ReservationOverviewResponse, UpdateEventRequest,
};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ApiError, ErrorResponse};
use crate::service::NewEvent;

/// `POST /events` — Create a new event.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failures.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create a new event",
    description = "Creates a bookable evening with its pricing configuration.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .events
        .create_event(NewEvent {
            name: req.name,
            date: req.date,
            event_type: req.event_type,
            minimum_spend: req.minimum_spend,
            minimum_spend_premium: req.minimum_spend_premium,
            ticket_price: req.ticket_price,
            ticket_price_premium: req.ticket_price_premium,
            minimum_spend_mode: req.minimum_spend_mode,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// `GET /events` — List upcoming events (plus the past grace week).
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failures.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List current events",
    description = "Returns upcoming events and those up to one week in the past, oldest first.",
    responses(
        (status = 200, description = "Event list", body = Vec<EventResponse>),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = state.events.list_current().await?;
    let response: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(Json(response))
}

/// `PUT /events/{id}` — Partially update an event.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] for unknown IDs.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Applies the given fields to an event; absent fields stay unchanged. Price changes take effect for all cost computations immediately.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .events
        .update_event(EventId::from_uuid(id), req.into())
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// `GET /events/{id}/reservations` — Admin overview of an event's
/// reservations.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] for unknown IDs.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/reservations",
    tag = "Events",
    summary = "List an event's reservations",
    description = "Returns every reservation of the event, newest first, enriched with the derived cost and a double-booking warning flag.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Reservation overview", body = Vec<ReservationOverviewResponse>),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_reservations(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = state
        .events
        .reservation_overview(EventId::from_uuid(id))
        .await?;
    let response: Vec<ReservationOverviewResponse> = overview
        .into_iter()
        .map(ReservationOverviewResponse::from)
        .collect();
    Ok(Json(response))
}

/// `GET /events/{id}/guest-list.pdf` — Printable guest list.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] for unknown IDs or
/// [`ApiError::Pdf`] when rendering fails.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/guest-list.pdf",
    tag = "Events",
    summary = "Download the guest list as PDF",
    description = "Renders the confirmed reservations of the event as a printable A4 guest list, sorted by table number.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Guest list PDF", content_type = "application/pdf"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn guest_list_pdf(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.events.guest_list_pdf(EventId::from_uuid(id)).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"gaesteliste-{id}.pdf\""),
            ),
        ],
        bytes,
    ))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", put(update_event))
        .route("/events/{id}/reservations", get(event_reservations))
        .route("/events/{id}/guest-list.pdf", get(guest_list_pdf))
}
