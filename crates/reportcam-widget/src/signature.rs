//! Where a controller gets its upload authorization from.

use std::time::Duration;

use async_trait::async_trait;
use reportcam_core::SignedUploadAuthorization;
use reportcam_signing::{SignatureIssuer, SigningError};
use reqwest::Client;
use thiserror::Error;

/// Path of the signing endpoint, relative to the API base URL.
pub const SIGNATURE_PATH: &str = "/api/v0/uploads/signature";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SignatureSourceError {
    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error("Signature request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Signature request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Provides one fresh authorization per activation. Authorizations are never cached:
/// each is only valid for the media host's signature window.
#[async_trait]
pub trait SignatureSource: Send + Sync {
    async fn fetch_signature(&self) -> Result<SignedUploadAuthorization, SignatureSourceError>;
}

/// Signs in-process, for callers that hold the API secret themselves.
#[derive(Debug, Clone)]
pub struct IssuerSignatureSource {
    issuer: SignatureIssuer,
}

impl IssuerSignatureSource {
    pub fn new(issuer: SignatureIssuer) -> Self {
        Self { issuer }
    }
}

#[async_trait]
impl SignatureSource for IssuerSignatureSource {
    async fn fetch_signature(&self) -> Result<SignedUploadAuthorization, SignatureSourceError> {
        Ok(self.issuer.issue()?)
    }
}

/// Asks the signing endpoint of the API.
#[derive(Debug, Clone)]
pub struct HttpSignatureSource {
    client: Client,
    url: String,
}

impl HttpSignatureSource {
    pub fn new(base_url: &str) -> Result<Self, SignatureSourceError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), SIGNATURE_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SignatureSource for HttpSignatureSource {
    async fn fetch_signature(&self) -> Result<SignedUploadAuthorization, SignatureSourceError> {
        let response = self.client.post(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SignatureSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportcam_core::{ApiSecret, SignatureAlgorithm};

    #[test]
    fn test_http_source_url() {
        let source = HttpSignatureSource::new("http://localhost:3000/").unwrap();
        assert_eq!(source.url(), "http://localhost:3000/api/v0/uploads/signature");
    }

    #[tokio::test]
    async fn test_issuer_source_propagates_configuration_error() {
        let source = IssuerSignatureSource::new(SignatureIssuer::new(
            None,
            Some(ApiSecret::new("test-secret-value")),
            SignatureAlgorithm::Sha1,
        ));
        let err = source.fetch_signature().await.unwrap_err();
        assert!(matches!(err, SignatureSourceError::Signing(SigningError::Configuration(_))));
    }
}
