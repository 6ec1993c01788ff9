//! Fixed upload policy.
//!
//! These values are bound into every upload signature. They are policy, not input:
//! the signing endpoint never lets a caller choose the folder, tags or source.

use std::time::Duration;

/// Destination folder on the media host for accident report attachments.
pub const UPLOAD_FOLDER: &str = "accident_reports";

/// Classification tags attached to every upload.
pub const UPLOAD_TAGS: &str = "user_upload, accident_report";

/// Workflow source tag the media host requires for upload widget signatures.
pub const UPLOAD_SOURCE: &str = "uw";

/// Upload widget script, injected at most once per page.
pub const WIDGET_SCRIPT_URL: &str = "https://upload-widget.cloudinary.com/global/all.js";

/// Bounded wait for the widget script's load signal.
pub const WIDGET_SCRIPT_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of files accepted in one widget session.
pub const DEFAULT_MAX_FILES: u32 = 5;

/// Maximum size of a single file, in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;

/// Formats the widget accepts (photos and short videos from phones).
pub const DEFAULT_ALLOWED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "heic", "webp", "mp4", "mov"];
