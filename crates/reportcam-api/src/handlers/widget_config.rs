use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use reportcam_core::WidgetClientConfig;
use std::sync::Arc;

/// Public settings for building the upload widget in the browser
#[utoipa::path(
    get,
    path = "/api/v0/uploads/widget-config",
    tag = "uploads",
    responses(
        (status = 200, description = "Widget settings", body = WidgetClientConfig)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_widget_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.widget.clone())
}
