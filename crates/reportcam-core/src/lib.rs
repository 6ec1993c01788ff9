//! Reportcam Core Library
//!
//! This crate provides the domain models, error types, configuration and the fixed
//! upload policy shared by the signing service, the upload widget controller and the API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{
    ApiSecret, CloudinaryConfig, Config, ServerConfig, SignatureAlgorithm, WidgetLimits,
};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ScopeParameters, SignedUploadAuthorization, UploadSource, WidgetClientConfig};
