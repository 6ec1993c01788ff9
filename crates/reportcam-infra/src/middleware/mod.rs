//! Shared HTTP middleware

pub mod no_store;
pub mod request_id;

pub use no_store::no_store_middleware;
pub use request_id::{get_request_id, request_id_middleware, RequestId};
