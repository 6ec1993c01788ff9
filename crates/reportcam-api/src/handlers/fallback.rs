use crate::error::HttpAppError;
use axum::http::Uri;
use reportcam_core::AppError;

/// Unknown routes answer with the standard JSON error body.
pub async fn not_found(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("No route for {}", uri.path())))
}
