//! `OpenAPI` tags and well-known content paths.

pub const SYSTEM_TAG: &str = "System";
pub const CLASSES_TAG: &str = "Classes";
pub const ABILITIES_TAG: &str = "Abilities";
pub const AUTH_TAG: &str = "Auth";

/// Extension of a class content unit.
pub const CONTENT_EXTENSION: &str = "yaml";

/// Sentinel accepted by the secondary-role filter for "no secondary role".
pub const NO_ROLE: &str = "None";
