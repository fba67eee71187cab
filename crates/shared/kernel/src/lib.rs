//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, identifier validation, and
//! (behind the `server` feature) the Axum state every feature router is built on.
//!
//! ## Config loading
//! ```rust,no_run
//! use lct_kernel::config::load_config;
//! use lct_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! ```
pub mod config;
pub mod prelude;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use lct_domain as domain;
