//! HTTP surface of the classes slice.

mod handlers;
mod response;
pub mod router;

pub use handlers::{AbilitySearchQuery, ClassDetailsQuery, ClassSearchQuery};
