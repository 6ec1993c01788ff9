//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use anyhow::{Context, Result};
use reportcam_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    reportcam_infra::init_telemetry(SERVICE_NAME, config.environment(), config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");
    report_signing_status(&config);

    let state = AppState::new(config.clone());
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

fn report_signing_status(config: &Config) {
    if config.signing_configured() {
        tracing::info!(
            algorithm = %config.cloudinary.signature_algorithm,
            "Upload signing enabled"
        );
    } else if config.is_production() {
        tracing::warn!(
            "CLOUDINARY_API_KEY or CLOUDINARY_API_SECRET is not set; signature requests will fail"
        );
    } else {
        tracing::info!("Upload signing credentials not set; signature requests will fail");
    }
}
