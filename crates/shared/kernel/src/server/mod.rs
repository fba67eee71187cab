mod error;
mod health;
pub mod router;
mod state;

pub use error::{ErrorBody, error_response};
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
