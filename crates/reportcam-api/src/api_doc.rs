//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use reportcam_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reportcam API",
        version = "0.1.0",
        description = "Issues signed authorizations for client-side uploads of accident report photos and videos. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::upload_signature::issue_upload_signature,
        handlers::widget_config::get_widget_config,
    ),
    components(schemas(
        models::SignedUploadAuthorization,
        models::ScopeParameters,
        models::WidgetClientConfig,
        models::UploadSource,
        ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload authorization and widget settings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_upload_routes() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v0/uploads/signature"));
        assert!(spec.paths.paths.contains_key("/api/v0/uploads/widget-config"));
    }
}
