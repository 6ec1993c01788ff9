//! Reportcam infrastructure library
//!
//! Shared plumbing for the HTTP service:
//! - Middleware (request ID, no-store caching)
//! - Tracing initialization
//! - Error response body

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

#[cfg(feature = "middleware")]
pub use middleware::{get_request_id, no_store_middleware, request_id_middleware, RequestId};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, DEFAULT_LOG_FILTER};

pub use error::ErrorResponse;
