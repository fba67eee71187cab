use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lct_derive::api_model;

/// JSON error body returned by every endpoint.
#[api_model]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// Builds the uniform `{ "error": ... }` response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}
