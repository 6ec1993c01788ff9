//! Shared widget-script presence.
//!
//! The page holds at most one copy of the widget script. Every controller goes through
//! one [`LibraryLoader`]: it checks the current presence under a single lock and then
//! either proceeds, attaches to the injection already in flight, or starts the one
//! injection itself. Waiters share the outcome through a `watch` channel.
//!
//! The injection runs as its own task. A controller that is dropped while waiting only
//! detaches; the script tag stays in the page and the outcome still lands for everyone
//! else. Once a tag has been inserted the loader never inserts another one: a failed
//! load is remembered until the page reports the library as present.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use reportcam_core::constants::{WIDGET_SCRIPT_LOAD_TIMEOUT, WIDGET_SCRIPT_URL};
use thiserror::Error;
use tokio::sync::watch;

use crate::host::ScriptHost;

/// Library load errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryLoadError {
    #[error("Upload widget script failed to load: {0}")]
    Script(String),

    #[error("Upload widget script did not load within {0:?}")]
    Timeout(Duration),

    /// The injection task stopped before the script signalled (runtime shutdown).
    #[error("Upload widget script injection was interrupted")]
    Interrupted,
}

type LoadOutcome = Result<(), LibraryLoadError>;

/// Observable presence of the widget library in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryPresence {
    Absent,
    /// An injection is in flight; `waiters` controllers are attached to it.
    Pending { waiters: usize },
    Present,
    /// The one injection failed. Sticky until the page reports the library.
    Failed,
}

enum PresenceState {
    Absent,
    Pending {
        outcome: watch::Receiver<Option<LoadOutcome>>,
        attached: Arc<()>,
    },
    Present,
    Failed(LibraryLoadError),
}

enum Claim {
    Present,
    Failed(LibraryLoadError),
    Attach {
        outcome: watch::Receiver<Option<LoadOutcome>>,
        attached: Arc<()>,
    },
}

/// Single coordination point for injecting the widget script.
pub struct LibraryLoader {
    script_url: String,
    timeout: Duration,
    state: Arc<Mutex<PresenceState>>,
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new(WIDGET_SCRIPT_URL, WIDGET_SCRIPT_LOAD_TIMEOUT)
    }
}

impl LibraryLoader {
    pub fn new(script_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            script_url: script_url.into(),
            timeout,
            state: Arc::new(Mutex::new(PresenceState::Absent)),
        }
    }

    /// Process-wide loader for the default script, shared by every controller.
    pub fn shared() -> Arc<LibraryLoader> {
        static SHARED: OnceLock<Arc<LibraryLoader>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(LibraryLoader::default()))
            .clone()
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn presence(&self) -> LibraryPresence {
        match &*lock(&self.state) {
            PresenceState::Absent => LibraryPresence::Absent,
            PresenceState::Pending { attached, .. } => LibraryPresence::Pending {
                waiters: Arc::strong_count(attached) - 1,
            },
            PresenceState::Present => LibraryPresence::Present,
            PresenceState::Failed(_) => LibraryPresence::Failed,
        }
    }

    /// Make sure the widget library is present, injecting its script at most once.
    ///
    /// Concurrent callers share one injection. After a failed load every caller gets the
    /// same error without a new injection, unless the library has since appeared.
    pub async fn ensure_loaded(
        &self,
        host: Arc<dyn ScriptHost>,
    ) -> Result<(), LibraryLoadError> {
        let (mut outcome, _attached) = match self.claim(host) {
            Claim::Present => return Ok(()),
            Claim::Failed(e) => return Err(e),
            Claim::Attach { outcome, attached } => (outcome, attached),
        };
        let outcome = match outcome.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        };
        outcome.unwrap_or(Err(LibraryLoadError::Interrupted))
    }

    /// Check-then-attach-or-inject under the lock.
    fn claim(&self, host: Arc<dyn ScriptHost>) -> Claim {
        let mut state = lock(&self.state);
        match &*state {
            PresenceState::Present => Claim::Present,
            PresenceState::Failed(e) => {
                if host.library_present() {
                    tracing::info!(url = %self.script_url, "Upload widget library appeared");
                    *state = PresenceState::Present;
                    return Claim::Present;
                }
                Claim::Failed(e.clone())
            }
            PresenceState::Pending { outcome, attached } => {
                tracing::debug!(
                    url = %self.script_url,
                    "Attaching to in-flight widget script injection"
                );
                Claim::Attach {
                    outcome: outcome.clone(),
                    attached: attached.clone(),
                }
            }
            PresenceState::Absent => {
                if host.library_present() {
                    *state = PresenceState::Present;
                    return Claim::Present;
                }
                let (tx, rx) = watch::channel(None);
                let attached = Arc::new(());
                *state = PresenceState::Pending {
                    outcome: rx.clone(),
                    attached: attached.clone(),
                };

                let injection = Injection {
                    state: Arc::clone(&self.state),
                    tx: Some(tx),
                };
                let url = self.script_url.clone();
                let timeout = self.timeout;
                tokio::spawn(async move {
                    let outcome = load_script(host.as_ref(), &url, timeout).await;
                    injection.complete(outcome);
                });

                Claim::Attach {
                    outcome: rx,
                    attached,
                }
            }
        }
    }
}

fn lock(state: &Mutex<PresenceState>) -> MutexGuard<'_, PresenceState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn load_script(host: &dyn ScriptHost, url: &str, timeout: Duration) -> LoadOutcome {
    tracing::info!(url = %url, "Injecting upload widget script");
    // The timer is dropped with this future, so a success cannot be followed by
    // a stray timeout.
    match tokio::time::timeout(timeout, host.inject_script(url)).await {
        Ok(Ok(())) => {
            tracing::info!(url = %url, "Upload widget script loaded");
            Ok(())
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Upload widget script failed to load");
            Err(LibraryLoadError::Script(e.reason))
        }
        Err(_) => {
            tracing::warn!(
                url = %url,
                timeout_ms = timeout.as_millis() as u64,
                "Upload widget script load timed out"
            );
            Err(LibraryLoadError::Timeout(timeout))
        }
    }
}

/// Publishes the injection outcome exactly once, even if the task is cancelled.
struct Injection {
    state: Arc<Mutex<PresenceState>>,
    tx: Option<watch::Sender<Option<LoadOutcome>>>,
}

impl Injection {
    fn complete(mut self, outcome: LoadOutcome) {
        self.publish(outcome);
    }

    fn publish(&mut self, outcome: LoadOutcome) {
        if let Some(tx) = self.tx.take() {
            *lock(&self.state) = match &outcome {
                Ok(()) => PresenceState::Present,
                Err(e) => PresenceState::Failed(e.clone()),
            };
            tx.send_replace(Some(outcome));
        }
    }
}

impl Drop for Injection {
    fn drop(&mut self) {
        self.publish(Err(LibraryLoadError::Interrupted));
    }
}
