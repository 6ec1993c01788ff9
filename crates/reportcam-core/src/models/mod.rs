pub mod upload_authorization;
pub mod widget_config;

pub use upload_authorization::{ScopeParameters, SignedUploadAuthorization};
pub use widget_config::{UploadSource, WidgetClientConfig};
