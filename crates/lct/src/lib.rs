//! Facade crate for LCTools features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `lct` with the `server` feature.
//! - Call `lct::init` to build the feature slices and `lct::server::router::api_router`
//!   for the combined routes.

use lct_domain::config::ApiConfig;
pub use lct_domain as domain;
pub use lct_kernel as kernel;

/// Failure while initialising a feature slice.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("classes: {0}")]
    Classes(#[from] features::classes::ClassesError),
    #[error("identity: {0}")]
    Identity(#[from] features::identity::IdentityError),
}

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use lct_kernel::server::ApiState;
        pub use lct_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System, class catalog and sign-in routes.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router::<ApiState>()
                .merge(lct_classes::server::router::classes_router())
                .merge(lct_identity::server::router::auth_router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use lct_classes as classes;
    pub use lct_identity as identity;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "classes",
        "identity",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all feature slices.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<domain::registry::InitializedSlice>, InitError> {
    Ok(vec![features::classes::init(config)?, features::identity::init(config)?])
}
