use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use reportcam_core::SignedUploadAuthorization;
use std::sync::Arc;

/// Issue a signed authorization for one client-side upload session
///
/// Every call signs the fixed accident-report policy at the current time. There is
/// no unsigned fallback: without credentials the request fails.
#[utoipa::path(
    post,
    path = "/api/v0/uploads/signature",
    tag = "uploads",
    responses(
        (status = 200, description = "Upload authorized", body = SignedUploadAuthorization),
        (status = 500, description = "Signing credentials are not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "issue_upload_signature"))]
pub async fn issue_upload_signature(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let authorization = state.issuer.issue()?;

    tracing::info!(
        timestamp = authorization.timestamp,
        folder = %authorization.scope.folder,
        algorithm = %state.issuer.algorithm(),
        "Upload signature issued"
    );

    Ok(Json(authorization))
}
