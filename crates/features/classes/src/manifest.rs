//! The manifest: a JSON array of content-unit filenames.
//!
//! The build-time generator and the runtime directory fallback both call
//! [`content_files`], so a generated manifest and a directory scan agree on order.

use crate::error::{ClassesError, ClassesErrorExt};
use lct_kernel::security::resource::ResourceGuard;
use std::io;
use std::path::Path;

/// Content-unit filenames directly inside `dir`, sorted lexicographically.
///
/// Files whose stem is not a valid content identifier (`high priest.yaml`,
/// `v1.2.yaml`) could never be loaded, so they are left out with a warning.
///
/// # Errors
/// Propagates I/O errors, including `NotFound` when `dir` is missing.
pub async fn content_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(stem) = ResourceGuard::id_from_file(&name) else {
            continue;
        };
        if ResourceGuard::content_id(stem).is_ok_and(|id| id == stem) {
            files.push(name);
        } else {
            tracing::warn!(file = %name, "Skipping content unit with an invalid identifier");
        }
    }

    files.sort_unstable();
    Ok(files)
}

/// Parses manifest text.
///
/// # Errors
/// [`ClassesError::Manifest`] when the text is not a JSON array of strings.
pub fn parse(text: &str) -> Result<Vec<String>, ClassesError> {
    serde_json::from_str(text).context("manifest")
}

/// Renders a manifest the way the generator writes it (pretty JSON).
///
/// # Errors
/// [`ClassesError::Manifest`] if serialisation fails.
pub fn render(files: &[String]) -> Result<String, ClassesError> {
    serde_json::to_string_pretty(files).context("manifest")
}

/// Scans `dir` and writes the manifest to `out`, returning the listed files.
///
/// # Errors
/// [`ClassesError::Io`] when the directory cannot be read or the file written.
pub async fn generate(dir: &Path, out: &Path) -> Result<Vec<String>, ClassesError> {
    let files = content_files(dir).await.context(dir.display().to_string())?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.context(parent.display().to_string())?;
    }
    tokio::fs::write(out, render(&files)? + "\n").await.context(out.display().to_string())?;

    tracing::info!(count = files.len(), out = %out.display(), "Manifest written");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn content_files_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["wizard.yaml", "bard.yaml", "notes.txt", "Knight.yaml"] {
            std::fs::write(dir.path().join(name), "class: {}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.yaml")).unwrap();

        let files = content_files(dir.path()).await.unwrap();
        assert_eq!(files, ["Knight.yaml", "bard.yaml", "wizard.yaml"]);
    }

    #[tokio::test]
    async fn content_files_skip_unloadable_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["high priest.yaml", "v1.2.yaml", " mage.yaml", ".yaml", "rune-knight.yaml"] {
            std::fs::write(dir.path().join(name), "class: {}").unwrap();
        }

        let files = content_files(dir.path()).await.unwrap();
        assert_eq!(files, ["rune-knight.yaml"]);
    }

    #[test]
    fn parse_rejects_non_arrays() {
        assert_eq!(parse(r#"["a.yaml","b.yaml"]"#).unwrap(), ["a.yaml", "b.yaml"]);
        assert!(matches!(parse(r#"{"a": 1}"#), Err(ClassesError::Manifest { .. })));
    }

    #[tokio::test]
    async fn generate_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let classes = dir.path().join("classes");
        std::fs::create_dir(&classes).unwrap();
        std::fs::write(classes.join("mage.yaml"), "class: {}").unwrap();
        let out = dir.path().join("out/class-list.json");

        let files = generate(&classes, &out).await.unwrap();
        assert_eq!(files, ["mage.yaml"]);

        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(parse(&written).unwrap(), files);
        assert!(written.contains("\n  \"mage.yaml\""));
    }
}
