//! # Domain Models
//!
//! Pure data shared by every crate of the workspace: configuration sections, the
//! feature-slice registry and `OpenAPI` tag constants.
//! Keep it lean: no I/O, networking, or heavy logic.

pub mod config;
pub mod constants;
pub mod registry;
