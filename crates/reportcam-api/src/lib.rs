//! Reportcam API Library
//!
//! HTTP surface of the upload signing service: handlers, error rendering and
//! application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;

pub mod error;
pub mod state;

pub use api_doc::get_openapi_spec;
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
