pub mod fallback;
pub mod upload_signature;
pub mod widget_config;
