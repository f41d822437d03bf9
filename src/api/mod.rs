//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`. With the default
//! `swagger-ui` feature the interactive documentation is served at
//! `/swagger-ui` from the generated OpenAPI document.

pub mod dto;
pub mod handlers;

use axum::Router;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[cfg(feature = "swagger-ui")]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "weindampfer-api",
        description = "Table reservations for themed boat events"
    ),
    paths(
        handlers::system::health_handler,
        handlers::event::create_event,
        handlers::event::list_events,
        handlers::event::update_event,
        handlers::event::event_reservations,
        handlers::event::guest_list_pdf,
        handlers::reservation::create_reservation,
        handlers::reservation::update_reservation,
        handlers::reservation::notify_reservation,
        handlers::reservation::payment_reminder,
        handlers::reservation::cancel_reservation,
        handlers::reservation::upload_invoice,
        handlers::reservation::download_invoice,
    ),
    tags(
        (name = "System", description = "Service health"),
        (name = "Events", description = "Event management and guest lists"),
        (name = "Reservations", description = "Reservation lifecycle and guest mail"),
    )
)]
struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());
    #[cfg(feature = "swagger-ui")]
    let router = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    router
}

#[cfg(all(test, feature = "swagger-ui"))]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_covers_all_resources() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/api/v1/events/{id}/reservations",
            "/api/v1/events/{id}/guest-list.pdf",
            "/api/v1/reservations",
            "/api/v1/reservations/{id}",
            "/api/v1/reservations/{id}/notify",
            "/api/v1/reservations/{id}/payment-reminder",
            "/api/v1/reservations/{id}/cancel",
            "/api/v1/reservations/{id}/invoice",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }
}
