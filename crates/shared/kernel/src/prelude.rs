pub use crate::domain::config::ApiConfig;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::security::resource::ResourceGuard;
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ErrorBody, error_response};
