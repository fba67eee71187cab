use crate::error::ClassesError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lct_kernel::server::error_response;

impl ClassesError {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Config { .. }
            | Self::Parse { .. }
            | Self::Manifest { .. }
            | Self::Io { .. }
            | Self::Upstream { .. }
            | Self::UpstreamStatus { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClassesError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Class request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Class request rejected");
        }
        error_response(status, self.to_string())
    }
}
