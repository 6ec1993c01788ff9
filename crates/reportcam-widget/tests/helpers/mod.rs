//! Test doubles for the page and the widget library.

#![allow(dead_code)]

use async_trait::async_trait;
use reportcam_core::{ApiSecret, SignatureAlgorithm, SignedUploadAuthorization};
use reportcam_signing::{FixedClock, SignatureIssuer};
use reportcam_widget::{
    IssuerSignatureSource, LibraryLoader, ScriptHost, ScriptLoadError, SessionCreateError,
    SessionHandle, SignatureSource, SignatureSourceError, UploadInfo, UploaderLibrary,
    WidgetCallback, WidgetOptions, WidgetRuntime, WidgetSettings,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_API_KEY: &str = "123456789";
pub const TEST_SECRET: &str = "test-secret-value";
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;
/// Signature of the fixed policy at `TEST_TIMESTAMP` with `TEST_SECRET` (SHA-1).
pub const TEST_SIGNATURE: &str = "40d10b27875a760d8d579bab0277f5661a9ed564";

/// How the fake page answers a script injection.
#[derive(Debug, Clone)]
pub enum LoadBehaviour {
    LoadAfter(Duration),
    FailAfter(Duration, String),
    /// Neither load nor error is ever signalled.
    Hang,
}

pub struct FakePage {
    present: AtomicBool,
    injections: AtomicUsize,
    behaviour: LoadBehaviour,
}

impl FakePage {
    pub fn new(behaviour: LoadBehaviour) -> Arc<Self> {
        Arc::new(Self {
            present: AtomicBool::new(false),
            injections: AtomicUsize::new(0),
            behaviour,
        })
    }

    pub fn loading() -> Arc<Self> {
        Self::new(LoadBehaviour::LoadAfter(Duration::from_millis(200)))
    }

    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub fn set_present(&self) {
        self.present.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScriptHost for FakePage {
    fn library_present(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    async fn inject_script(&self, url: &str) -> Result<(), ScriptLoadError> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            LoadBehaviour::LoadAfter(delay) => {
                tokio::time::sleep(*delay).await;
                self.present.store(true, Ordering::SeqCst);
                Ok(())
            }
            LoadBehaviour::FailAfter(delay, reason) => {
                tokio::time::sleep(*delay).await;
                Err(ScriptLoadError {
                    url: url.to_string(),
                    reason: reason.clone(),
                })
            }
            LoadBehaviour::Hang => std::future::pending().await,
        }
    }
}

/// What the test can observe about one created session.
#[derive(Clone)]
pub struct SessionRecord {
    pub options: WidgetOptions,
    pub callback: WidgetCallback,
    pub opens: Arc<AtomicUsize>,
    pub destroys: Arc<AtomicUsize>,
}

impl SessionRecord {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }
}

struct FakeHandle {
    opens: Arc<AtomicUsize>,
    destroys: Arc<AtomicUsize>,
}

impl SessionHandle for FakeHandle {
    fn open(&mut self) {
        self.opens.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy(&mut self) {
        self.destroys.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeLibrary {
    fail_with: Option<String>,
    sessions: Mutex<Vec<SessionRecord>>,
}

impl FakeLibrary {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            sessions: Mutex::new(Vec::new()),
        })
    }

    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn created(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn last(&self) -> SessionRecord {
        self.sessions
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no session created")
    }
}

impl UploaderLibrary for FakeLibrary {
    fn create_upload_widget(
        &self,
        options: &WidgetOptions,
        callback: WidgetCallback,
    ) -> Result<Box<dyn SessionHandle>, SessionCreateError> {
        if let Some(message) = &self.fail_with {
            return Err(SessionCreateError(message.clone()));
        }
        let record = SessionRecord {
            options: options.clone(),
            callback,
            opens: Arc::new(AtomicUsize::new(0)),
            destroys: Arc::new(AtomicUsize::new(0)),
        };
        let handle = FakeHandle {
            opens: record.opens.clone(),
            destroys: record.destroys.clone(),
        };
        self.sessions.lock().unwrap().push(record);
        Ok(Box::new(handle))
    }
}

pub fn test_issuer(secret: Option<&str>) -> SignatureIssuer {
    SignatureIssuer::new(
        Some(TEST_API_KEY.to_string()),
        secret.map(ApiSecret::new),
        SignatureAlgorithm::Sha1,
    )
    .with_clock(Arc::new(FixedClock(TEST_TIMESTAMP)))
}

/// Signs in-process, except for the next fetch after `fail_next()`.
pub struct FlakySignatures {
    inner: IssuerSignatureSource,
    fail_next: AtomicBool,
}

impl FlakySignatures {
    pub fn new(issuer: SignatureIssuer) -> Self {
        Self {
            inner: IssuerSignatureSource::new(issuer),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SignatureSource for FlakySignatures {
    async fn fetch_signature(&self) -> Result<SignedUploadAuthorization, SignatureSourceError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SignatureSourceError::Status {
                status: 503,
                body: "signing unavailable".to_string(),
            });
        }
        self.inner.fetch_signature().await
    }
}

pub fn runtime_with(
    loader: Arc<LibraryLoader>,
    page: Arc<FakePage>,
    library: Arc<FakeLibrary>,
    issuer: SignatureIssuer,
) -> WidgetRuntime {
    WidgetRuntime {
        loader,
        host: page,
        library,
        signatures: Arc::new(IssuerSignatureSource::new(issuer)),
    }
}

/// Fresh loader per test, so tests never share page state.
pub fn runtime(page: Arc<FakePage>, library: Arc<FakeLibrary>) -> WidgetRuntime {
    runtime_with(
        Arc::new(LibraryLoader::default()),
        page,
        library,
        test_issuer(Some(TEST_SECRET)),
    )
}

pub fn settings() -> WidgetSettings {
    WidgetSettings {
        cloud_name: Some("demo".to_string()),
        upload_preset: Some("accident_reports_signed".to_string()),
        ..Default::default()
    }
}

/// Owner-side sink recording every relayed upload.
pub fn recorder() -> (Arc<Mutex<Vec<UploadInfo>>>, impl FnMut(UploadInfo) + Send + 'static) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    (received, move |info| sink.lock().unwrap().push(info))
}
