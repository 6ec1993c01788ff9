use async_trait::async_trait;
use thiserror::Error;

/// The script element reported an error instead of loading.
#[derive(Debug, Clone, Error)]
#[error("script {url} failed to load: {reason}")]
pub struct ScriptLoadError {
    pub url: String,
    pub reason: String,
}

/// The page the widget script is injected into.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Whether the widget library's global is already registered.
    fn library_present(&self) -> bool;

    /// Insert a script element for `url` and resolve on its load or error signal.
    ///
    /// May never resolve if the page gives no signal; callers bound the wait.
    async fn inject_script(&self, url: &str) -> Result<(), ScriptLoadError>;
}
