//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type of the service. Each variant maps
//! to a specific HTTP status code and a structured JSON error response.
//! Validation failures additionally carry a per-field message map so the
//! reservation form can show errors next to the offending input.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldErrors;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "validation failed",
///     "fields": { "email": "Ungültige E-Mail-Adresse" }
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the code-range table on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation messages, present for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 2000–2999 | Not Found         | 404 Not Found              |
/// | 3000–3999 | Server            | 500 Internal Server Error  |
/// | 4000–4999 | Mail / Storage    | 502 Bad Gateway / 500      |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(uuid::Uuid),

    /// Reservation with the given ID was not found.
    #[error("reservation not found: {0}")]
    ReservationNotFound(uuid::Uuid),

    /// The reservation form failed validation; field messages attached.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Request was malformed in a non-field-specific way.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Outbound mail could not be built or sent.
    #[error("mail error: {0}")]
    Mail(String),

    /// Invoice file could not be stored or read.
    #[error("storage error: {0}")]
    Storage(String),

    /// Guest-list PDF rendering failed.
    #[error("pdf error: {0}")]
    Pdf(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::EventNotFound(_) => 2001,
            Self::ReservationNotFound(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Pdf(_) => 3002,
            Self::Mail(_) => 4001,
            Self::Storage(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::ReservationNotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Pdf(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Mail(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let (message, fields) = match self {
            Self::Validation(fields) => ("validation failed".to_string(), Some(fields)),
            other => (other.to_string(), None),
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                fields,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_categories() {
        assert_eq!(
            ApiError::Validation(FieldErrors::default()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::EventNotFound(uuid::Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ReservationNotFound(uuid::Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Mail("smtp down".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Persistence("db down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_response_carries_field_map() {
        let mut fields = FieldErrors::default();
        fields.insert("email", "Ungültige E-Mail-Adresse");
        let response = ApiError::Validation(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_response_exports_a_schema() {
        // Handler annotations reference these bodies by schema name.
        assert_eq!(ErrorResponse::name(), "ErrorResponse");
        assert_eq!(ErrorBody::name(), "ErrorBody");
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            ApiError::Validation(FieldErrors::default()).error_code(),
            1001
        );
        assert_eq!(
            ApiError::EventNotFound(uuid::Uuid::new_v4()).error_code(),
            2001
        );
        assert_eq!(
            ApiError::ReservationNotFound(uuid::Uuid::new_v4()).error_code(),
            2002
        );
        assert_eq!(ApiError::Mail(String::new()).error_code(), 4001);
    }
}
