//! Record Loader: one content unit in, one normalised [`ClassRecord`] out.

use crate::error::{ClassesError, ClassesErrorExt};
use crate::model::{ClassDocument, ClassRecord};
use crate::source::ContentSource;
use lct_domain::config::ContentConfig;
use lct_kernel::security::resource::ResourceGuard;

/// Rewrites image URLs that point at an external host to locally served files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRewrite {
    hosts: Vec<String>,
    path: String,
}

impl ImageRewrite {
    #[must_use]
    pub fn new(hosts: Vec<String>, path: impl Into<String>) -> Self {
        let hosts = hosts.into_iter().filter(|h| !h.trim().is_empty()).collect();
        Self { hosts, path: path.into().trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.image_hosts.clone(), config.image_path.as_str())
    }

    /// `Some("https://cdn.angelssword.com/x.png")` for "Wave Palm" becomes
    /// `Some("/images/classes/Wave_Palm.webp")`. Each whitespace run in the name,
    /// leading and trailing ones included, becomes one `_`. Blank URLs become `None`.
    #[must_use]
    pub fn apply(&self, name: &str, url: Option<String>) -> Option<String> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        if !self.hosts.iter().any(|host| url.contains(host.as_str())) {
            return Some(url);
        }

        Some(format!("{}/{}.webp", self.path, underscore_whitespace(name)))
    }
}

fn underscore_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Derived-field normalisation applied to every loaded record.
///
/// The record's id is always the identifier of the unit it was loaded from; an
/// `id` written inside the unit is ignored. Pure and idempotent.
#[must_use]
pub fn normalise(mut record: ClassRecord, unit_id: &str, images: &ImageRewrite) -> ClassRecord {
    if record.id != unit_id {
        if !record.id.trim().is_empty() {
            tracing::debug!(unit = unit_id, declared = %record.id, "Ignoring id declared inside unit");
        }
        unit_id.clone_into(&mut record.id);
    }
    record.secondary_role = record.secondary_role.filter(|role| !role.trim().is_empty());
    record.image_url = images.apply(&record.name, record.image_url.take());
    record
}

/// Parses the text of the unit stored under `id`.
///
/// # Errors
/// [`ClassesError::Parse`] naming the unit when the text is not a class document.
pub fn parse_unit(id: &str, text: &str, images: &ImageRewrite) -> Result<ClassRecord, ClassesError> {
    let document: ClassDocument =
        serde_yaml::from_str(text).context(ResourceGuard::content_file(id))?;
    Ok(normalise(document.class, id, images))
}

/// Resolves identifiers to records through a [`ContentSource`].
#[derive(Debug)]
pub struct RecordLoader<'a, S> {
    source: &'a S,
    images: &'a ImageRewrite,
}

impl<'a, S: ContentSource> RecordLoader<'a, S> {
    pub const fn new(source: &'a S, images: &'a ImageRewrite) -> Self {
        Self { source, images }
    }

    /// Loads the record stored under `id`; `Ok(None)` when no such unit exists.
    ///
    /// # Errors
    /// * [`ClassesError::Validation`] for malformed identifiers.
    /// * [`ClassesError::Parse`] for malformed content.
    /// * Source errors ([`ClassesError::Io`], [`ClassesError::Upstream`], ...).
    pub async fn load(&self, id: &str) -> Result<Option<ClassRecord>, ClassesError> {
        let id = ResourceGuard::content_id(id)?;
        let Some(text) = self.source.unit(&ResourceGuard::content_file(&id)).await? else {
            return Ok(None);
        };

        parse_unit(&id, &text, self.images).map(Some)
    }

    pub(crate) const fn source(&self) -> &'a S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> ImageRewrite {
        ImageRewrite::new(vec!["cdn.angelssword.com".to_owned()], "/images/classes/")
    }

    const UNIT: &str = r"
class:
  name: Wave  Palm
  main_role: Striker
  secondary_role: ''
  image_url: https://cdn.angelssword.com/uploads/wave.png
  homebrew_notes: ignored
";

    #[test]
    fn parse_applies_defaults_and_rewrites_image() {
        let record = parse_unit("wave_palm", UNIT, &images()).unwrap();

        assert_eq!(record.id, "wave_palm");
        assert_eq!(record.tier, 1);
        assert_eq!(record.difficulty, 1);
        assert_eq!(record.secondary_role, None);
        assert_eq!(record.image_url.as_deref(), Some("/images/classes/Wave_Palm.webp"));
        assert!(record.abilities.is_empty());
    }

    #[test]
    fn normalise_is_idempotent() {
        let once = parse_unit("wave_palm", UNIT, &images()).unwrap();
        let twice = normalise(once.clone(), "wave_palm", &images());
        assert_eq!(once, twice);
    }

    #[test]
    fn unit_identifier_overrides_declared_id() {
        let record = parse_unit("a", "class:\n  id: aegis\n  name: Aegis\n", &images()).unwrap();
        assert_eq!(record.id, "a");
    }

    #[test]
    fn whitespace_runs_map_to_single_underscores() {
        assert_eq!(underscore_whitespace("Wave  Palm"), "Wave_Palm");
        assert_eq!(underscore_whitespace(" Rune\tKnight "), "_Rune_Knight_");
        assert_eq!(underscore_whitespace("Mage"), "Mage");
    }

    #[test]
    fn foreign_and_blank_images_are_kept_or_dropped() {
        let rewrite = images();
        assert_eq!(
            rewrite.apply("Mage", Some("https://img.example/mage.png".to_owned())).as_deref(),
            Some("https://img.example/mage.png")
        );
        assert_eq!(rewrite.apply("Mage", Some("  ".to_owned())), None);
        assert_eq!(rewrite.apply("Mage", None), None);
    }

    #[test]
    fn parse_error_names_the_unit() {
        let err = parse_unit("broken", "class: [unterminated", &images()).unwrap_err();
        assert!(matches!(err, ClassesError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"), "{err}");
    }
}
