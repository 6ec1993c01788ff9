//! Signature issuer.
//!
//! Takes no input from the caller. The scope parameters come from the fixed policy in
//! [`reportcam_core::constants`], so a client cannot redirect uploads to another folder
//! or tag set by tampering with the request.

use std::fmt;
use std::sync::Arc;

use reportcam_core::{
    ApiSecret, CloudinaryConfig, ScopeParameters, SignatureAlgorithm, SignedUploadAuthorization,
};
use subtle::ConstantTimeEq;

use crate::canonical::{digest_hex, string_to_sign};
use crate::clock::{Clock, SystemClock};
use crate::error::SigningError;

/// Mints signed upload authorizations.
///
/// Stateless apart from read-only credentials and the clock; cheap to clone and safe to
/// share between concurrent requests.
#[derive(Clone)]
pub struct SignatureIssuer {
    api_key: Option<String>,
    api_secret: Option<ApiSecret>,
    algorithm: SignatureAlgorithm,
    scope: ScopeParameters,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SignatureIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureIssuer")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret)
            .field("algorithm", &self.algorithm)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl SignatureIssuer {
    pub fn new(
        api_key: Option<String>,
        api_secret: Option<ApiSecret>,
        algorithm: SignatureAlgorithm,
    ) -> Self {
        Self {
            api_key,
            api_secret,
            algorithm,
            scope: ScopeParameters::accident_reports(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(config: &CloudinaryConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_secret.clone(),
            config.signature_algorithm,
        )
    }

    /// Replace the clock the issuance instant is read from.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Issue an authorization for one upload session, stamped with the current time.
    pub fn issue(&self) -> Result<SignedUploadAuthorization, SigningError> {
        self.issue_at(self.clock.now_unix())
    }

    /// Issue an authorization for a recorded instant.
    ///
    /// The signature is a pure function of the timestamp, the policy and the secret, so
    /// re-issuing at the same timestamp reproduces the same signature.
    pub fn issue_at(&self, timestamp: i64) -> Result<SignedUploadAuthorization, SigningError> {
        let (api_key, secret) = self.credentials()?;
        let signature = self.sign(timestamp, &self.scope, secret);

        tracing::debug!(
            timestamp,
            folder = %self.scope.folder,
            algorithm = %self.algorithm,
            "Issued upload signature"
        );

        Ok(SignedUploadAuthorization {
            signature,
            timestamp,
            api_key: api_key.to_string(),
            scope: self.scope.clone(),
        })
    }

    /// Recompute the signature of `authorization` and compare in constant time.
    ///
    /// Mirrors the check the media host performs: any change to the timestamp or the
    /// scope parameters after issuance makes this return false.
    pub fn verify(&self, authorization: &SignedUploadAuthorization) -> Result<bool, SigningError> {
        let (api_key, secret) = self.credentials()?;
        if authorization.api_key != api_key {
            return Ok(false);
        }
        let expected = self.sign(authorization.timestamp, &authorization.scope, secret);
        Ok(expected
            .as_bytes()
            .ct_eq(authorization.signature.as_bytes())
            .into())
    }

    fn credentials(&self) -> Result<(&str, &ApiSecret), SigningError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SigningError::Configuration("CLOUDINARY_API_KEY is not set".into()))?;
        let secret = self
            .api_secret
            .as_ref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                SigningError::Configuration("CLOUDINARY_API_SECRET is not set".into())
            })?;
        Ok((api_key, secret))
    }

    fn sign(&self, timestamp: i64, scope: &ScopeParameters, secret: &ApiSecret) -> String {
        let params = scope
            .signed_pairs()
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .chain(std::iter::once(("timestamp", timestamp.to_string())));
        digest_hex(&string_to_sign(params), secret.expose(), self.algorithm)
    }
}
