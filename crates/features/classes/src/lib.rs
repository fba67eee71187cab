//! Class catalog feature slice.
//!
//! Loads class records from a static content root (local directory or a
//! deployment's asset path over HTTP), assembles them in manifest order, and
//! filters them for the query endpoints.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), lct_classes::ClassesError> {
//! use lct_classes::{ClassCatalog, FilterCriteria, FsContentSource, ImageRewrite};
//!
//! let source = FsContentSource::new("public", "data/class-list.json", "data/classes");
//! let images = ImageRewrite::default();
//! let catalog = ClassCatalog::new(&source, &images, true);
//!
//! let tanks = catalog.search(&FilterCriteria::default().role("tank")).await?;
//! # Ok(()) }
//! ```

pub mod abilities;
pub mod catalog;
mod error;
pub mod filter;
pub mod loader;
pub mod manifest;
pub mod model;
#[cfg(feature = "server")]
pub mod server;
mod service;
pub mod source;

pub use abilities::{AbilityCriteria, AbilityEntry, AbilityFacets, AbilityIndex};
pub use catalog::{Catalog, CatalogAssembler};
pub use error::{ClassesError, ClassesErrorExt};
pub use filter::{FilterCriteria, RangeFilter, filter};
pub use loader::{ImageRewrite, RecordLoader};
pub use model::ClassRecord;
pub use service::ClassCatalog;
pub use source::{ContentSource, ContentStore, FsContentSource, HttpContentSource};

use lct_kernel::domain::config::ApiConfig;
use lct_kernel::domain::registry::InitializedSlice;

/// Class catalog feature state.
#[lct_derive::lct_slice]
pub struct Classes {
    pub store: ContentStore,
    pub images: ImageRewrite,
    pub directory_fallback: bool,
}

impl Classes {
    /// Query surface over the configured store.
    #[must_use]
    pub fn catalog(&self) -> ClassCatalog<'_, ContentStore> {
        ClassCatalog::new(&self.store, &self.images, self.directory_fallback)
    }
}

/// Initialize the classes feature from the `[content]` section.
///
/// # Errors
/// Returns an error when the configured content source cannot be constructed.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, ClassesError> {
    let content = &config.content;
    let store = ContentStore::from_config(content)?;

    tracing::info!(
        source = ?store.kind(),
        manifest = %content.manifest,
        directory_fallback = content.directory_fallback,
        "Classes slice initialized"
    );

    let slice = Classes::new(ClassesInner {
        store,
        images: ImageRewrite::from_config(content),
        directory_fallback: content.directory_fallback,
    });
    Ok(InitializedSlice::new(slice))
}
