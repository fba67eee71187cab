use crate::abilities::{AbilityCriteria, AbilityEntry, AbilityFacets, AbilityIndex};
use crate::catalog::{Catalog, CatalogAssembler};
use crate::error::ClassesError;
use crate::filter::{FilterCriteria, filter};
use crate::loader::{ImageRewrite, RecordLoader};
use crate::model::ClassRecord;
use crate::source::ContentSource;
use lct_kernel::security::resource::ResourceGuard;

/// Query surface over one content source.
///
/// Nothing is cached: every call assembles the catalog afresh from the source.
#[derive(Debug)]
pub struct ClassCatalog<'a, S> {
    loader: RecordLoader<'a, S>,
    assembler: CatalogAssembler<'a, S>,
}

impl<'a, S: ContentSource> ClassCatalog<'a, S> {
    pub const fn new(source: &'a S, images: &'a ImageRewrite, directory_fallback: bool) -> Self {
        Self {
            loader: RecordLoader::new(source, images),
            assembler: CatalogAssembler::new(RecordLoader::new(source, images), directory_fallback),
        }
    }

    /// # Errors
    /// Manifest resolution errors; see [`CatalogAssembler::assemble`].
    pub async fn catalog(&self) -> Result<Catalog, ClassesError> {
        self.assembler.assemble().await
    }

    /// # Errors
    /// Manifest resolution errors.
    pub async fn list_all(&self) -> Result<Vec<ClassRecord>, ClassesError> {
        Ok(self.catalog().await?.into_records())
    }

    /// Looks up one class by identifier.
    ///
    /// # Errors
    /// * [`ClassesError::Validation`] for a blank or malformed identifier.
    /// * [`ClassesError::NotFound`] when the manifest does not list the identifier or
    ///   its unit is missing.
    /// * [`ClassesError::Parse`] when the unit is malformed.
    pub async fn get_by_id(&self, id: &str) -> Result<ClassRecord, ClassesError> {
        let id = ResourceGuard::content_id(id)?;

        if !self.assembler.identifiers().await?.contains(&id) {
            return Err(ClassesError::not_found(id));
        }

        self.loader.load(&id).await?.ok_or_else(|| ClassesError::not_found(id))
    }

    /// # Errors
    /// [`ClassesError::Validation`] for inverted ranges, plus manifest errors.
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<ClassRecord>, ClassesError> {
        criteria.validate()?;
        Ok(filter(&self.catalog().await?, criteria))
    }

    /// # Errors
    /// Manifest resolution errors.
    pub async fn roles(&self) -> Result<Vec<String>, ClassesError> {
        Ok(self.catalog().await?.roles())
    }

    /// # Errors
    /// Manifest resolution errors.
    pub async fn abilities(&self, criteria: &AbilityCriteria) -> Result<Vec<AbilityEntry>, ClassesError> {
        Ok(AbilityIndex::from_catalog(&self.catalog().await?).search(criteria))
    }

    /// # Errors
    /// Manifest resolution errors.
    pub async fn ability_facets(&self) -> Result<AbilityFacets, ClassesError> {
        Ok(AbilityIndex::from_catalog(&self.catalog().await?).facets())
    }
}
