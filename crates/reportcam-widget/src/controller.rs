//! Upload widget lifecycle controller.
//!
//! One controller per mounted upload button. It owns at most one session handle and
//! moves through `Loading -> Ready | Error`:
//!
//! 1. `activate()` validates configuration, fetches an authorization, makes sure the
//!    widget library is present and creates a session bound to the authorization.
//! 2. `open()` is honoured only once a session is ready.
//! 3. Session events are queued by the widget callback and fed into the state machine
//!    by `dispatch_pending()` / `process_next_event()`.
//! 4. `teardown()` (also run on drop) destroys the handle and stops relaying events.

use std::fmt;
use std::sync::Arc;

use reportcam_core::{Config, WidgetClientConfig, WidgetLimits};
use tokio::sync::mpsc;

use crate::error::{WidgetError, WidgetErrorKind};
use crate::host::ScriptHost;
use crate::library::LibraryLoader;
use crate::session::{
    SessionHandle, UploadInfo, UploaderLibrary, WidgetCallback, WidgetEvent, WidgetOptions,
};
use crate::signature::SignatureSource;

/// Lifecycle of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Loading,
    Ready,
    Error,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Loading => f.write_str("loading"),
            LifecycleState::Ready => f.write_str("ready"),
            LifecycleState::Error => f.write_str("error"),
        }
    }
}

/// Public widget settings. Cloud name and upload preset are required at activation.
#[derive(Debug, Clone, Default)]
pub struct WidgetSettings {
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
    pub limits: WidgetLimits,
    pub theme: Option<String>,
}

impl WidgetSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cloud_name: config.cloudinary.cloud_name.clone(),
            upload_preset: config.cloudinary.upload_preset.clone(),
            limits: config.widget.clone(),
            theme: None,
        }
    }

    /// Settings from the API's public widget configuration.
    pub fn from_client_config(client: &WidgetClientConfig) -> Self {
        Self {
            cloud_name: client.cloud_name.clone(),
            upload_preset: client.upload_preset.clone(),
            limits: WidgetLimits {
                max_files: client.max_files,
                max_file_size_bytes: client.max_file_size,
                allowed_formats: client.allowed_formats.clone(),
            },
            theme: None,
        }
    }

    fn required(&self) -> Result<(String, String), WidgetError> {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        match (present(&self.cloud_name), present(&self.upload_preset)) {
            (Some(cloud_name), Some(upload_preset)) => Ok((cloud_name, upload_preset)),
            (cloud_name, _) => {
                let missing = if cloud_name.is_none() {
                    "cloud name"
                } else {
                    "upload preset"
                };
                Err(WidgetError::new(
                    WidgetErrorKind::ConfigurationMissing,
                    format!("Uploads are not configured: missing {}", missing),
                ))
            }
        }
    }
}

/// Collaborators shared between controllers on the same page.
#[derive(Clone)]
pub struct WidgetRuntime {
    pub loader: Arc<LibraryLoader>,
    pub host: Arc<dyn ScriptHost>,
    pub library: Arc<dyn UploaderLibrary>,
    pub signatures: Arc<dyn SignatureSource>,
}

impl WidgetRuntime {
    /// Runtime on the process-wide [`LibraryLoader`], so every controller on the page
    /// shares one script injection.
    pub fn new(
        host: Arc<dyn ScriptHost>,
        library: Arc<dyn UploaderLibrary>,
        signatures: Arc<dyn SignatureSource>,
    ) -> Self {
        Self {
            loader: LibraryLoader::shared(),
            host,
            library,
            signatures,
        }
    }
}

type SuccessRelay = Box<dyn FnMut(UploadInfo) + Send>;

pub struct WidgetController {
    settings: WidgetSettings,
    runtime: WidgetRuntime,
    on_upload_success: SuccessRelay,
    state: LifecycleState,
    error: Option<WidgetError>,
    handle: Option<Box<dyn SessionHandle>>,
    events: Option<mpsc::UnboundedReceiver<WidgetEvent>>,
    active: bool,
}

impl fmt::Debug for WidgetController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetController")
            .field("state", &self.state)
            .field("error", &self.error)
            .field("has_handle", &self.handle.is_some())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl WidgetController {
    /// `on_upload_success` receives one call per file accepted by the media host.
    pub fn new<F>(settings: WidgetSettings, runtime: WidgetRuntime, on_upload_success: F) -> Self
    where
        F: FnMut(UploadInfo) + Send + 'static,
    {
        Self {
            settings,
            runtime,
            on_upload_success: Box::new(on_upload_success),
            state: LifecycleState::Loading,
            error: None,
            handle: None,
            events: None,
            active: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Present only in the `Error` state.
    pub fn error(&self) -> Option<&WidgetError> {
        self.error.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    pub fn has_session(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run activation to completion and return the resulting state.
    ///
    /// Calling it again (e.g. on remount after an error) re-enters `Loading` and
    /// replaces the previous session. The previous session is destroyed on entry, so a
    /// re-activation that fails leaves no live handle behind.
    pub async fn activate(&mut self) -> LifecycleState {
        self.release_session();
        self.active = true;
        self.enter(LifecycleState::Loading);

        let (cloud_name, upload_preset) = match self.settings.required() {
            Ok(required) => required,
            Err(e) => return self.fail(e),
        };

        let authorization = match self.runtime.signatures.fetch_signature().await {
            Ok(authorization) => authorization,
            Err(e) => {
                return self.fail(WidgetError::new(
                    WidgetErrorKind::SignatureUnavailable,
                    format!("Could not authorize the upload: {}", e),
                ))
            }
        };

        if let Err(e) = self
            .runtime
            .loader
            .ensure_loaded(self.runtime.host.clone())
            .await
        {
            return self.fail(WidgetError::new(
                WidgetErrorKind::ExternalLibraryLoadFailed,
                e.to_string(),
            ));
        }

        let options = WidgetOptions::bind(
            cloud_name,
            upload_preset,
            authorization,
            &self.settings.limits,
            self.settings.theme.clone(),
        );
        self.create_session(&options)
    }

    fn create_session(&mut self, options: &WidgetOptions) -> LifecycleState {
        let (tx, rx) = mpsc::unbounded_channel();
        match self
            .runtime
            .library
            .create_upload_widget(options, WidgetCallback::new(tx))
        {
            Ok(handle) => {
                self.handle = Some(handle);
                self.events = Some(rx);
                tracing::info!(
                    folder = %options.folder,
                    max_files = options.max_files,
                    "Upload widget session created"
                );
                self.enter(LifecycleState::Ready)
            }
            Err(e) => self.fail(WidgetError::new(
                WidgetErrorKind::SessionCreateFailed,
                format!("Could not create the upload widget: {}", e),
            )),
        }
    }

    /// Open the widget. Returns whether the call was delegated to the session.
    ///
    /// After an `UploadRejected` error the session is still usable: opening it again
    /// returns the controller to `Ready`. In any other non-ready state this is a no-op
    /// that records `NotInitialized`.
    pub fn open(&mut self) -> bool {
        let retryable = self
            .error
            .as_ref()
            .is_some_and(WidgetError::is_recoverable);
        let permitted = self.active && (self.state == LifecycleState::Ready || retryable);

        let Some(handle) = self.handle.as_mut().filter(|_| permitted) else {
            self.fail(WidgetError::new(
                WidgetErrorKind::NotInitialized,
                "The uploader is not ready yet",
            ));
            return false;
        };

        handle.open();
        if self.state != LifecycleState::Ready {
            self.enter(LifecycleState::Ready);
        }
        true
    }

    /// Apply every event queued so far. Returns how many were applied.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next session event and apply it. Returns false once the session is
    /// gone (torn down or never created).
    pub async fn process_next_event(&mut self) -> bool {
        let Some(rx) = self.events.as_mut() else {
            return false;
        };
        match rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_event(&mut self, event: WidgetEvent) {
        if !self.active {
            tracing::debug!(?event, "Discarding upload widget event after teardown");
            return;
        }
        match event {
            WidgetEvent::Success(info) => {
                tracing::info!(public_id = ?info.public_id(), "Upload accepted");
                (self.on_upload_success)(info);
            }
            WidgetEvent::Error(message) => {
                self.fail(WidgetError::new(WidgetErrorKind::UploadRejected, message));
            }
            WidgetEvent::Other(name) => {
                tracing::debug!(event = %name, "Ignoring upload widget lifecycle event");
            }
        }
    }

    /// Destroy the session and stop relaying events. Idempotent.
    ///
    /// In-flight transfers of the external session are not cancelled; their events are
    /// simply discarded.
    pub fn teardown(&mut self) {
        if self.active {
            tracing::debug!("Tearing down upload widget controller");
        }
        self.active = false;
        self.release_session();
    }

    /// Release before replace: the old session's listeners and event queue go first.
    fn release_session(&mut self) {
        self.events = None;
        if let Some(mut handle) = self.handle.take() {
            handle.destroy();
        }
    }

    fn enter(&mut self, state: LifecycleState) -> LifecycleState {
        if state != LifecycleState::Error {
            self.error = None;
        }
        if self.state != state {
            tracing::debug!(from = %self.state, to = %state, "Upload widget state change");
        }
        self.state = state;
        state
    }

    fn fail(&mut self, error: WidgetError) -> LifecycleState {
        tracing::warn!(kind = %error.kind, error = %error.message, "Upload widget error");
        self.error = Some(error);
        self.enter(LifecycleState::Error)
    }
}

impl Drop for WidgetController {
    fn drop(&mut self) {
        self.teardown();
    }
}
