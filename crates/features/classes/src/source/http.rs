use super::ContentSource;
use crate::error::{ClassesError, ClassesErrorExt};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Static asset path of a deployment, fetched over HTTP.
///
/// The client is built once when the slice starts and shared by every request.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: Client,
    manifest_url: String,
    classes_url: String,
}

impl HttpContentSource {
    /// # Errors
    /// [`ClassesError::Config`] when `base_url` is blank.
    pub fn new(
        client: Client,
        base_url: &str,
        manifest: &str,
        classes_dir: &str,
    ) -> Result<Self, ClassesError> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ClassesError::config("content.base_url is required for the http source"));
        }

        Ok(Self {
            client,
            manifest_url: format!("{base}/{}", manifest.trim_start_matches('/')),
            classes_url: format!("{base}/{}", classes_dir.trim_matches('/')),
        })
    }

    /// HTTP client with a request timeout and no redirects.
    ///
    /// # Errors
    /// [`ClassesError::Upstream`] when the TLS backend cannot be initialised.
    pub fn client(timeout_secs: u64) -> Result<Client, ClassesError> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build content HTTP client")
    }

    async fn get_optional(&self, url: &str) -> Result<Option<String>, ClassesError> {
        let resp = self.client.get(url).send().await.context(url.to_owned())?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(resp.text().await.context(url.to_owned())?)),
            status => Err(ClassesError::UpstreamStatus {
                status: status.as_u16(),
                context: Some(url.to_owned().into()),
            }),
        }
    }
}

impl ContentSource for HttpContentSource {
    async fn manifest(&self) -> Result<Option<String>, ClassesError> {
        self.get_optional(&self.manifest_url).await
    }

    async fn unit(&self, file: &str) -> Result<Option<String>, ClassesError> {
        self.get_optional(&format!("{}/{file}", self.classes_url)).await
    }

    async fn list_units(&self) -> Result<Option<Vec<String>>, ClassesError> {
        Ok(None)
    }
}
