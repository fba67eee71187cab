use std::borrow::Cow;

/// Errors raised while loading, assembling or querying the class catalog.
#[lct_derive::lct_error]
pub enum ClassesError {
    /// The content source cannot satisfy the request as configured.
    #[error("Classes configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Class not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected user input (identifiers, ranges).
    #[error("Invalid request{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A content unit is not a valid class document. The context names the unit.
    #[error("Malformed content unit{}: {source}", format_context(.context))]
    Parse { source: serde_yaml::Error, context: Option<Cow<'static, str>> },

    /// The manifest is not a JSON array of filenames.
    #[error("Malformed manifest{}: {source}", format_context(.context))]
    Manifest { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Content I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Transport failure talking to the HTTP content source.
    #[error("Upstream request failed{}: {source}", format_context(.context))]
    Upstream { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Upstream responded with status {status}{}", format_context(.context))]
    UpstreamStatus { status: u16, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal classes error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ClassesError {
    pub(crate) fn not_found(id: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: id.into(), context: None }
    }

    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config { message: message.into(), context: None }
    }
}

impl From<lct_kernel::security::resource::ResourceGuardError> for ClassesError {
    fn from(err: lct_kernel::security::resource::ResourceGuardError) -> Self {
        Self::validation(err.to_string())
    }
}
