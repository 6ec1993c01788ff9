use reportcam_core::AppError;
use thiserror::Error;

/// Signing errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// Credentials are missing. Fatal to the request: an unsigned upload is never an
    /// acceptable fallback.
    #[error("Upload signing is not configured: {0}")]
    Configuration(String),
}

impl From<SigningError> for AppError {
    fn from(err: SigningError) -> Self {
        match err {
            SigningError::Configuration(msg) => AppError::Configuration(msg),
        }
    }
}
