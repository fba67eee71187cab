use std::borrow::Cow;

/// A specialized [`IdentityError`] enum of this crate.
#[lct_derive::lct_error]
pub enum IdentityError {
    /// Missing or invalid identity-provider settings.
    #[error("Identity config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected caller input (e.g. a missing authorization code).
    #[error("Invalid sign-in request{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Transport or decoding failure talking to the identity provider.
    #[error("Identity provider request failed{}: {source}", format_context(.context))]
    Upstream { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Identity provider responded with status {status}{}", format_context(.context))]
    UpstreamStatus { status: u16, context: Option<Cow<'static, str>> },

    /// Session token signing or verification failure.
    #[error("Session token error{}: {source}", format_context(.context))]
    Token { source: jsonwebtoken::errors::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IdentityError {
    pub(crate) fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config { message: message.into(), context: None }
    }
}
