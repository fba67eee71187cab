//! Where the manifest and the content units come from.

mod fs;
mod http;

pub use fs::FsContentSource;
pub use http::HttpContentSource;

use crate::error::ClassesError;
use lct_domain::config::{ContentConfig, ContentSourceKind};
use std::future::Future;

/// Read-only access to the class content root.
///
/// `Ok(None)` means "does not exist"; any other failure is an error.
pub trait ContentSource: Send + Sync {
    /// Raw manifest text.
    fn manifest(&self) -> impl Future<Output = Result<Option<String>, ClassesError>> + Send;

    /// Raw text of the unit stored under `file` (e.g. `mage.yaml`).
    fn unit(&self, file: &str)
    -> impl Future<Output = Result<Option<String>, ClassesError>> + Send;

    /// Unit filenames in manifest order, or `None` when the source cannot enumerate
    /// its content directory.
    fn list_units(&self)
    -> impl Future<Output = Result<Option<Vec<String>>, ClassesError>> + Send;
}

/// The configured content source.
#[derive(Debug, Clone)]
pub enum ContentStore {
    Fs(FsContentSource),
    Http(HttpContentSource),
}

impl ContentStore {
    /// Builds the source selected by `content.source`.
    ///
    /// # Errors
    /// [`ClassesError::Config`] when the HTTP source has no base URL, and
    /// [`ClassesError::Upstream`] when the HTTP client cannot be constructed.
    pub fn from_config(config: &ContentConfig) -> Result<Self, ClassesError> {
        match config.source {
            ContentSourceKind::Fs => Ok(Self::Fs(FsContentSource::new(
                &config.root,
                &config.manifest,
                &config.classes_dir,
            ))),
            ContentSourceKind::Http => {
                let client = HttpContentSource::client(config.request_timeout_secs)?;
                Ok(Self::Http(HttpContentSource::new(
                    client,
                    &config.base_url,
                    &config.manifest,
                    &config.classes_dir,
                )?))
            },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ContentSourceKind {
        match self {
            Self::Fs(_) => ContentSourceKind::Fs,
            Self::Http(_) => ContentSourceKind::Http,
        }
    }
}

impl ContentSource for ContentStore {
    async fn manifest(&self) -> Result<Option<String>, ClassesError> {
        match self {
            Self::Fs(source) => source.manifest().await,
            Self::Http(source) => source.manifest().await,
        }
    }

    async fn unit(&self, file: &str) -> Result<Option<String>, ClassesError> {
        match self {
            Self::Fs(source) => source.unit(file).await,
            Self::Http(source) => source.unit(file).await,
        }
    }

    async fn list_units(&self) -> Result<Option<Vec<String>>, ClassesError> {
        match self {
            Self::Fs(source) => source.list_units().await,
            Self::Http(source) => source.list_units().await,
        }
    }
}
