//! HTTP surface of the identity slice.

mod handlers;
pub mod router;

pub use handlers::CallbackQuery;
