use lct_domain::constants::CONTENT_EXTENSION;
use std::borrow::Cow;

const MAX_ID_LEN: usize = 128;

#[lct_derive::lct_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Validation of user-supplied content identifiers.
///
/// A content identifier must resolve to exactly one content unit inside the content
/// root, so anything that could address another file (separators, dots, empty
/// strings) is rejected before it reaches the filesystem or an upstream URL.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Normalises a content identifier.
    ///
    /// Surrounding whitespace and a trailing `.yaml` extension are stripped; the
    /// remainder must be 1..=128 ASCII alphanumerics, `_` or `-`.
    ///
    /// # Errors
    /// Returns [`ResourceGuardError::Validation`] for empty or malformed identifiers.
    pub fn content_id(id: impl AsRef<str>) -> Result<String, ResourceGuardError> {
        let trimmed = id.as_ref().trim();
        let stem = trimmed
            .strip_suffix(CONTENT_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(trimmed);

        if stem.is_empty() {
            return Err(ResourceGuardError::Validation {
                message: "identifier is required".into(),
                context: None,
            });
        }
        if stem.len() > MAX_ID_LEN {
            return Err(ResourceGuardError::Validation {
                message: format!("identifier exceeds {MAX_ID_LEN} characters").into(),
                context: None,
            });
        }
        if let Some(bad) = stem.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))) {
            return Err(ResourceGuardError::Validation {
                message: format!("unexpected character {bad:?} in '{stem}'").into(),
                context: Some("Content identifier".into()),
            });
        }

        Ok(stem.to_owned())
    }

    /// Filename of the content unit for an already validated identifier.
    #[must_use]
    pub fn content_file(id: &str) -> String {
        format!("{id}.{CONTENT_EXTENSION}")
    }

    /// Identifier of a manifest entry, if the entry names a content unit.
    #[must_use]
    pub fn id_from_file(file: &str) -> Option<&str> {
        file.strip_suffix(CONTENT_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_normalisation() {
        assert_eq!(ResourceGuard::content_id("mage").unwrap(), "mage");
        assert_eq!(ResourceGuard::content_id(" mage_knight.yaml ").unwrap(), "mage_knight");
        assert_eq!(ResourceGuard::content_id("wave-palm").unwrap(), "wave-palm");
    }

    #[test]
    fn test_content_id_rejects_traversal() {
        assert!(ResourceGuard::content_id("../secrets").is_err());
        assert!(ResourceGuard::content_id("classes/mage").is_err());
        assert!(ResourceGuard::content_id("").is_err());
        assert!(ResourceGuard::content_id(".yaml").is_err());
    }

    #[test]
    fn test_file_mapping() {
        assert_eq!(ResourceGuard::content_file("mage"), "mage.yaml");
        assert_eq!(ResourceGuard::id_from_file("mage.yaml"), Some("mage"));
        assert_eq!(ResourceGuard::id_from_file("notes.txt"), None);
        assert_eq!(ResourceGuard::id_from_file(".yaml"), None);
    }
}
