//! Widget error taxonomy.
//!
//! None of these escape the controller as a failure: they are captured into the
//! `Error` lifecycle state together with a message that can be shown to the user.

use std::fmt;

/// What went wrong, independent of the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetErrorKind {
    /// Cloud name or upload preset is not configured.
    ConfigurationMissing,
    /// The signing endpoint could not provide an authorization.
    SignatureUnavailable,
    /// The widget script failed to load or did not signal completion in time.
    ExternalLibraryLoadFailed,
    /// The widget factory rejected the session options.
    SessionCreateFailed,
    /// An action was invoked before the session was ready.
    NotInitialized,
    /// The media host declined an upload. The session stays usable.
    UploadRejected,
}

impl WidgetErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetErrorKind::ConfigurationMissing => "configuration_missing",
            WidgetErrorKind::SignatureUnavailable => "signature_unavailable",
            WidgetErrorKind::ExternalLibraryLoadFailed => "external_library_load_failed",
            WidgetErrorKind::SessionCreateFailed => "session_create_failed",
            WidgetErrorKind::NotInitialized => "not_initialized",
            WidgetErrorKind::UploadRejected => "upload_rejected",
        }
    }
}

impl fmt::Display for WidgetErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error detail held by a controller in the `Error` state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WidgetError {
    pub kind: WidgetErrorKind,
    /// Human-readable cause, suitable for direct display
    pub message: String,
}

impl WidgetError {
    pub fn new(kind: WidgetErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the user can retry `open()` without recreating the controller.
    pub fn is_recoverable(&self) -> bool {
        self.kind == WidgetErrorKind::UploadRejected
    }
}
