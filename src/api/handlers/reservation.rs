//! Reservation handlers: the public form submission and the admin
//! lifecycle actions.

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};

use crate::api::dto::{
    CancelReservationRequest, CreateReservationRequest, InvoiceUploadResponse,
    ReservationResponse, UpdateReservationRequest,
};
use crate::app_state::AppState;
use crate::domain::{EventId, ReservationId};
use crate::error::{ApiError, ErrorResponse};

/// `POST /reservations` — Submit a reservation request (public form).
///
/// # Errors
///
/// Returns [`ApiError::Validation`] with per-field messages on form
/// errors, [`ApiError::EventNotFound`] for unknown events.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    summary = "Submit a reservation request",
    description = "Validates the guest form against the event line's rules, stores the reservation in REQUESTED state, and sends the receipt mail.",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation requested", body = ReservationResponse),
        (status = 400, description = "Validation failed; per-field messages attached", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = EventId::from_uuid(req.event_id);
    let reservation = state.reservations.create(event_id, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

/// `PUT /reservations/{id}` — Partially update a reservation (admin).
///
/// # Errors
///
/// Returns [`ApiError::ReservationNotFound`] for unknown IDs.
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    summary = "Update a reservation",
    description = "Applies the given fields; absent fields stay unchanged. The first transition into CANCELLED sends the decline mail exactly once.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .reservations
        .update(ReservationId::from_uuid(id), req.into())
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// `POST /reservations/{id}/notify` — Send the confirmation mail with
/// payment data.
///
/// # Errors
///
/// Returns [`ApiError::ReservationNotFound`] for unknown IDs or
/// [`ApiError::Mail`] when sending fails.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/notify",
    tag = "Reservations",
    summary = "Notify the guest",
    description = "Sends the confirmation mail with the amount computed from the event's current pricing, attaches the uploaded invoice if present, and stamps the notification time.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Guest notified", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 502, description = "Mail delivery failed", body = ErrorResponse),
    )
)]
pub async fn notify_reservation(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .reservations
        .notify(ReservationId::from_uuid(id))
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// `POST /reservations/{id}/payment-reminder` — Send the payment reminder.
///
/// # Errors
///
/// Returns [`ApiError::ReservationNotFound`] for unknown IDs or
/// [`ApiError::Mail`] when sending fails.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/payment-reminder",
    tag = "Reservations",
    summary = "Send a payment reminder",
    description = "Sends the reminder mail for the outstanding advance payment and stamps the reminder time.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Reminder sent", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 502, description = "Mail delivery failed", body = ErrorResponse),
    )
)]
pub async fn payment_reminder(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .reservations
        .send_payment_reminder(ReservationId::from_uuid(id))
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// `POST /reservations/{id}/cancel` — Cancel with a reason mailed to the
/// guest.
///
/// # Errors
///
/// Returns [`ApiError::ReservationNotFound`] for unknown IDs or
/// [`ApiError::Mail`] when sending fails.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    summary = "Cancel a reservation",
    description = "Moves the reservation to CANCELLED and mails the free-text reason to the guest, honoring the one-shot cancellation mail guard.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    request_body = CancelReservationRequest,
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 502, description = "Mail delivery failed", body = ErrorResponse),
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<CancelReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .reservations
        .cancel(ReservationId::from_uuid(id), &req.reason)
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// `POST /reservations/{id}/invoice` — Upload the invoice PDF.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when the multipart body carries no
/// `file` part or the part is not a PDF.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/invoice",
    tag = "Reservations",
    summary = "Upload an invoice PDF",
    description = "Stores the uploaded PDF for the reservation; re-uploading replaces the previous file. The invoice is attached to the next confirmation mail.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Invoice stored", body = InvoiceUploadResponse),
        (status = 400, description = "No PDF file part in the upload", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
    )
)]
pub async fn upload_invoice(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if field.content_type() != Some("application/pdf") {
            return Err(ApiError::InvalidRequest(
                "invoice must be a PDF (application/pdf)".to_string(),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("failed to read upload: {e}")))?;
        let path = state
            .reservations
            .store_invoice(ReservationId::from_uuid(id), &bytes)
            .await?;
        return Ok(Json(InvoiceUploadResponse { invoice_path: path }));
    }
    Err(ApiError::InvalidRequest(
        "missing multipart field 'file'".to_string(),
    ))
}

/// `GET /reservations/{id}/invoice` — Download the stored invoice PDF.
///
/// # Errors
///
/// Returns [`ApiError::ReservationNotFound`] when the reservation does not
/// exist or has no invoice.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/invoice",
    tag = "Reservations",
    summary = "Download the invoice PDF",
    description = "Returns the previously uploaded invoice of the reservation.",
    params(
        ("id" = uuid::Uuid, Path, description = "Reservation UUID"),
    ),
    responses(
        (status = 200, description = "Invoice PDF", content_type = "application/pdf"),
        (status = 404, description = "Reservation or invoice not found", body = ErrorResponse),
    )
)]
pub async fn download_invoice(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .reservations
        .invoice_pdf(ReservationId::from_uuid(id))
        .await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"rechnung-{id}.pdf\""),
            ),
        ],
        bytes,
    ))
}

/// Reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route("/reservations/{id}", put(update_reservation))
        .route("/reservations/{id}/notify", post(notify_reservation))
        .route(
            "/reservations/{id}/payment-reminder",
            post(payment_reminder),
        )
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        .route(
            "/reservations/{id}/invoice",
            post(upload_invoice).get(download_invoice),
        )
}
