//! Catalog Assembler.

use crate::error::ClassesError;
use crate::loader::RecordLoader;
use crate::manifest;
use crate::model::ClassRecord;
use crate::source::ContentSource;
use lct_kernel::security::resource::ResourceGuard;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Ordered, duplicate-free records in manifest order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ClassRecord>,
}

impl Catalog {
    /// Builds a catalog, keeping the first record of each identifier.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = ClassRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.id.clone());
                if !fresh {
                    warn!(id = %record.id, "Skipping duplicate class identifier");
                }
                fresh
            })
            .collect();
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ClassRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ClassRecord> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ClassRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Sorted, de-duplicated role tags across all records.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(ClassRecord::tags)
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ClassRecord;
    type IntoIter = std::slice::Iter<'a, ClassRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Resolves the manifest through a [`RecordLoader`].
#[derive(Debug)]
pub struct CatalogAssembler<'a, S> {
    loader: RecordLoader<'a, S>,
    directory_fallback: bool,
}

impl<'a, S: ContentSource> CatalogAssembler<'a, S> {
    pub const fn new(loader: RecordLoader<'a, S>, directory_fallback: bool) -> Self {
        Self { loader, directory_fallback }
    }

    /// Unit filenames in catalog order.
    ///
    /// The manifest wins when present. Without one, the sorted content directory is
    /// used if the fallback is enabled and the source can list its units.
    ///
    /// # Errors
    /// * [`ClassesError::Manifest`] for a malformed manifest.
    /// * [`ClassesError::Config`] when neither a manifest nor a listing is available.
    pub async fn entries(&self) -> Result<Vec<String>, ClassesError> {
        let source = self.loader.source();
        if let Some(text) = source.manifest().await? {
            return manifest::parse(&text);
        }

        if !self.directory_fallback {
            return Err(ClassesError::config("class manifest is unavailable"));
        }
        warn!("Class manifest unavailable, falling back to directory listing");

        source.list_units().await?.ok_or_else(|| {
            ClassesError::config("class manifest is unavailable and the source cannot be listed")
        })
    }

    /// Identifiers named by [`Self::entries`].
    ///
    /// # Errors
    /// Same as [`Self::entries`].
    pub async fn identifiers(&self) -> Result<Vec<String>, ClassesError> {
        Ok(self
            .entries()
            .await?
            .iter()
            .filter_map(|file| ResourceGuard::id_from_file(file))
            .map(str::to_owned)
            .collect())
    }

    /// Loads every unit in order, skipping (and logging) units that are missing,
    /// malformed or unreadable.
    ///
    /// # Errors
    /// Only manifest resolution errors; individual unit failures never fail assembly.
    pub async fn assemble(&self) -> Result<Catalog, ClassesError> {
        let entries = self.entries().await?;
        let mut records = Vec::with_capacity(entries.len());

        for file in &entries {
            let Some(id) = ResourceGuard::id_from_file(file) else {
                warn!(file = %file, "Skipping manifest entry that is not a content unit");
                continue;
            };

            match self.loader.load(id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => warn!(id, "Skipping class listed in manifest but not found"),
                Err(e) => warn!(id, error = %e, "Skipping unreadable class"),
            }
        }

        let catalog = Catalog::from_records(records);
        debug!(listed = entries.len(), loaded = catalog.len(), "Catalog assembled");
        Ok(catalog)
    }
}
