//! Boundary with the widget library: the factory, the session handle it returns and
//! the `(error, result)` callback it reports through.

use reportcam_core::{SignedUploadAuthorization, UploadSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// Options handed to the widget factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_key: String,
    pub upload_signature: String,
    pub upload_signature_timestamp: i64,
    pub folder: String,
    pub tags: String,
    pub source: String,
    pub sources: Vec<UploadSource>,
    pub multiple: bool,
    pub max_files: u32,
    pub client_allowed_formats: Vec<String>,
    pub max_file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl WidgetOptions {
    /// Scope fields are copied verbatim from the authorization; the media host rejects
    /// the upload if they differ from what was signed.
    pub(crate) fn bind(
        cloud_name: String,
        upload_preset: String,
        authorization: SignedUploadAuthorization,
        limits: &reportcam_core::WidgetLimits,
        theme: Option<String>,
    ) -> Self {
        Self {
            cloud_name,
            upload_preset,
            api_key: authorization.api_key,
            upload_signature: authorization.signature,
            upload_signature_timestamp: authorization.timestamp,
            folder: authorization.scope.folder,
            tags: authorization.scope.tags,
            source: authorization.scope.source,
            sources: vec![UploadSource::Local, UploadSource::Camera],
            multiple: limits.max_files > 1,
            max_files: limits.max_files,
            client_allowed_formats: limits.allowed_formats.clone(),
            max_file_size: limits.max_file_size_bytes,
            theme,
        }
    }
}

/// Result descriptor of one accepted file, relayed to the owner as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadInfo(pub Value);

impl UploadInfo {
    pub fn public_id(&self) -> Option<&str> {
        self.0.get("public_id").and_then(Value::as_str)
    }

    pub fn secure_url(&self) -> Option<&str> {
        self.0.get("secure_url").and_then(Value::as_str)
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.0.get("resource_type").and_then(Value::as_str)
    }

    pub fn bytes(&self) -> Option<u64> {
        self.0.get("bytes").and_then(Value::as_u64)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// The `result` argument of the widget callback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetResult {
    pub event: String,
    #[serde(default)]
    pub info: Value,
}

/// Session-level events, translated from the raw callback.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// One file was accepted by the media host.
    Success(UploadInfo),
    /// The media host or the widget reported an error.
    Error(String),
    /// Any other lifecycle event (`display-changed`, `queues-end`, ...).
    Other(String),
}

impl WidgetEvent {
    pub fn from_callback(error: Option<Value>, result: Option<WidgetResult>) -> Self {
        if let Some(error) = error {
            return WidgetEvent::Error(error_message(&error));
        }
        match result {
            Some(result) if result.event == "success" => {
                WidgetEvent::Success(UploadInfo(result.info))
            }
            Some(result) => WidgetEvent::Other(result.event),
            None => WidgetEvent::Other(String::new()),
        }
    }
}

/// The widget reports errors as plain strings or as `{ "message": ... }` objects,
/// sometimes nested under `status`.
fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("status"))
            .map(error_message)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

/// Callback given to the widget factory.
///
/// Only translates and queues; the controller's state machine consumes the queue.
/// Once the controller is torn down the queue is closed and events are dropped here.
#[derive(Debug, Clone)]
pub struct WidgetCallback {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl WidgetCallback {
    pub(crate) fn new(tx: mpsc::UnboundedSender<WidgetEvent>) -> Self {
        Self { tx }
    }

    /// Invoke with the widget's raw `(error, result)` arguments.
    pub fn call(&self, error: Option<Value>, result: Option<WidgetResult>) {
        self.emit(WidgetEvent::from_callback(error, result));
    }

    pub fn emit(&self, event: WidgetEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Upload widget event discarded after teardown");
        }
    }
}

/// Factory failure, carrying the library's own message.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SessionCreateError(pub String);

/// The widget library's global object.
pub trait UploaderLibrary: Send + Sync {
    /// Create one upload session. Errors surface synchronously, as the library throws.
    fn create_upload_widget(
        &self,
        options: &WidgetOptions,
        callback: WidgetCallback,
    ) -> Result<Box<dyn SessionHandle>, SessionCreateError>;
}

/// A live upload session returned by the factory.
pub trait SessionHandle: Send {
    fn open(&mut self);

    /// Release the session and the listeners it registered in the page.
    fn destroy(&mut self);
}
