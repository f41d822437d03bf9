//! Request and response DTOs for the REST API.

pub mod event_dto;
pub mod reservation_dto;

pub use event_dto::{CreateEventRequest, EventResponse, UpdateEventRequest};
pub use reservation_dto::{
    CancelReservationRequest, CreateReservationRequest, InvoiceUploadResponse,
    ReservationOverviewResponse, ReservationResponse, UpdateReservationRequest,
};
