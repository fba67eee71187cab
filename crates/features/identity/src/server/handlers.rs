use crate::Identity;
use crate::error::IdentityError;
use crate::gate::SignInDecision;
use crate::session::Session;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use lct_derive::api_handler;
use lct_domain::constants::AUTH_TAG;
use lct_kernel::server::{ApiState, ErrorBody, error_response};
use serde::Deserialize;

impl IdentityError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Sign-in failed");
        }
        error_response(status, self.to_string())
    }
}

fn slice(state: &ApiState) -> Result<&Identity, IdentityError> {
    state.try_get_slice::<Identity>().map_err(|e| IdentityError::Internal {
        message: e.to_string().into(),
        context: None,
    })
}

/// Query string Discord appends to the redirect URI.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    /// Authorization code
    pub code: Option<String>,
    /// Set by Discord when the user denied access
    pub error: Option<String>,
}

#[api_handler(
    get,
    path = "/api/auth/discord/login",
    responses(
        (status = TEMPORARY_REDIRECT, description = "Redirect to the Discord consent screen"),
        (status = INTERNAL_SERVER_ERROR, description = "Discord is not configured", body = ErrorBody),
    ),
    tag = AUTH_TAG,
)]
pub(super) async fn login(State(state): State<ApiState>) -> Result<Redirect, IdentityError> {
    Ok(Redirect::temporary(&slice(&state)?.authorize_url()?))
}

#[api_handler(
    get,
    path = "/api/auth/discord/callback",
    params(CallbackQuery),
    responses(
        (status = OK, description = "Signed-in session", body = Session),
        (status = BAD_REQUEST, description = "Missing authorization code", body = ErrorBody),
        (status = FORBIDDEN, description = "Not a member of the required guild", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, body = ErrorBody),
    ),
    tag = AUTH_TAG,
)]
pub(super) async fn callback(
    State(state): State<ApiState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, IdentityError> {
    if let Some(error) = query.error {
        return Ok(error_response(StatusCode::FORBIDDEN, format!("Sign-in was denied: {error}")));
    }

    let code = query.code.filter(|c| !c.trim().is_empty()).ok_or(IdentityError::Validation {
        message: "authorization code is required".into(),
        context: None,
    })?;

    match slice(&state)?.gate()?.sign_in(&code).await? {
        SignInDecision::Allowed(session) => Ok(Json(session).into_response()),
        SignInDecision::Rejected(reason) => Ok(error_response(StatusCode::FORBIDDEN, reason.message())),
    }
}
