//! Reportcam Upload Widget
//!
//! Drives the third-party upload widget from the accident report form:
//!
//! - [`LibraryLoader`] injects the widget script at most once per page and lets late
//!   controllers attach to an injection that is already in flight.
//! - [`WidgetController`] fetches a signed authorization, creates one upload session
//!   bound to it, mediates `open()` and relays accepted files to its owner, tracking
//!   the session as `Loading -> Ready | Error`.
//!
//! The page and the widget library are reached through the [`ScriptHost`] and
//! [`UploaderLibrary`] traits, so the controller runs the same against a real browser
//! bridge or against fakes in tests.

pub mod controller;
pub mod error;
pub mod host;
pub mod library;
pub mod session;
pub mod signature;

pub use controller::{LifecycleState, WidgetController, WidgetRuntime, WidgetSettings};
pub use error::{WidgetError, WidgetErrorKind};
pub use host::{ScriptHost, ScriptLoadError};
pub use library::{LibraryLoadError, LibraryLoader, LibraryPresence};
pub use session::{
    SessionCreateError, SessionHandle, UploadInfo, UploaderLibrary, WidgetCallback,
    WidgetEvent, WidgetOptions, WidgetResult,
};
pub use signature::{
    HttpSignatureSource, IssuerSignatureSource, SignatureSource, SignatureSourceError,
};
