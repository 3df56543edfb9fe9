//! Mapping of service errors onto HTTP responses.
//!
//! Bodies are fixed `text/plain` strings that clients match on, so they must
//! not change.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::service::ServiceError;

pub const NOT_FOUND_BODY: &str = "Client not found!";
pub const INVALID_RESOURCE_BODY: &str = "Invalid risk profile!";
pub const INTERNAL_ERROR_BODY: &str = "Internal server error";

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, NOT_FOUND_BODY),
            ServiceError::InvalidResource(_) => (StatusCode::BAD_REQUEST, INVALID_RESOURCE_BODY),
            // Already logged with full context by the service instrumentation.
            ServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY),
        }
        .into_response()
    }
}
