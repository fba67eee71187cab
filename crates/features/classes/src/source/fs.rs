use super::ContentSource;
use crate::error::{ClassesError, ClassesErrorExt};
use crate::manifest;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Content root on the local filesystem (a static asset directory).
#[derive(Debug, Clone)]
pub struct FsContentSource {
    manifest: PathBuf,
    classes_dir: PathBuf,
}

impl FsContentSource {
    #[must_use]
    pub fn new(root: impl AsRef<Path>, manifest: &str, classes_dir: &str) -> Self {
        let root = root.as_ref();
        Self { manifest: root.join(manifest), classes_dir: root.join(classes_dir) }
    }

    async fn read_optional(path: &Path) -> Result<Option<String>, ClassesError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(path.display().to_string()),
        }
    }
}

impl ContentSource for FsContentSource {
    async fn manifest(&self) -> Result<Option<String>, ClassesError> {
        Self::read_optional(&self.manifest).await
    }

    async fn unit(&self, file: &str) -> Result<Option<String>, ClassesError> {
        Self::read_optional(&self.classes_dir.join(file)).await
    }

    async fn list_units(&self) -> Result<Option<Vec<String>>, ClassesError> {
        match manifest::content_files(&self.classes_dir).await {
            Ok(files) => Ok(Some(files)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(self.classes_dir.display().to_string()),
        }
    }
}
