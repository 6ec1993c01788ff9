use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::constants::{UPLOAD_FOLDER, WIDGET_SCRIPT_URL};

/// Where the widget lets the user pick files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadSource {
    /// Local file picker
    Local,
    /// Device camera
    Camera,
}

/// Public settings the browser needs to build an upload widget.
///
/// Everything here is safe to expose; the API secret is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetClientConfig {
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_api_key: Option<String>,
    pub folder: String,
    pub sources: Vec<UploadSource>,
    pub max_files: u32,
    pub max_file_size: u64,
    pub allowed_formats: Vec<String>,
    pub script_url: String,
}

impl WidgetClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cloud_name: config.cloudinary.cloud_name.clone(),
            upload_preset: config.cloudinary.upload_preset.clone(),
            api_key: config.cloudinary.api_key.clone(),
            maps_api_key: config.maps_api_key.clone(),
            folder: UPLOAD_FOLDER.to_string(),
            sources: vec![UploadSource::Local, UploadSource::Camera],
            max_files: config.widget.max_files,
            max_file_size: config.widget.max_file_size_bytes,
            allowed_formats: config.widget.allowed_formats.clone(),
            script_url: WIDGET_SCRIPT_URL.to_string(),
        }
    }
}
