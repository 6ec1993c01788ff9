//! Application state shared by all handlers.

use reportcam_core::{Config, WidgetClientConfig};
use reportcam_signing::SignatureIssuer;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub issuer: SignatureIssuer,
    /// Public widget settings, derived once from `config`.
    pub widget: WidgetClientConfig,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        Self::with_issuer(SignatureIssuer::from_config(&config.cloudinary), config)
    }

    /// Build with a custom issuer (e.g. one with a fixed clock).
    pub fn with_issuer(issuer: SignatureIssuer, config: Config) -> Arc<Self> {
        let widget = WidgetClientConfig::from_config(&config);
        Arc::new(Self {
            config,
            issuer,
            widget,
        })
    }
}
