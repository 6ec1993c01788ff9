use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{UPLOAD_FOLDER, UPLOAD_SOURCE, UPLOAD_TAGS};

/// Upload-policy fields bound into a signature.
///
/// The client must replay these exactly as received; the media host recomputes the
/// signature from them and rejects the upload if anything changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScopeParameters {
    /// Destination folder on the media host
    #[schema(example = "accident_reports")]
    pub folder: String,
    /// Comma separated classification tags
    #[schema(example = "user_upload, accident_report")]
    pub tags: String,
    /// Workflow source tag required by the media host
    #[schema(example = "uw")]
    pub source: String,
}

impl ScopeParameters {
    /// The fixed policy every authorization is issued under.
    pub fn accident_reports() -> Self {
        Self {
            folder: UPLOAD_FOLDER.to_string(),
            tags: UPLOAD_TAGS.to_string(),
            source: UPLOAD_SOURCE.to_string(),
        }
    }

    /// Name/value pairs that take part in the signature, in no particular order.
    pub fn signed_pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("folder", self.folder.as_str()),
            ("tags", self.tags.as_str()),
            ("source", self.source.as_str()),
        ]
    }
}

/// Short-lived authorization for one client-side upload session.
///
/// Created fresh per request and never persisted. Only public values cross the
/// boundary; the secret the signature was computed with stays on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadAuthorization {
    /// Hex digest over the timestamp, scope parameters and the API secret
    pub signature: String,
    /// Seconds since the Unix epoch at issuance
    pub timestamp: i64,
    /// Public API key identifying the credential set
    pub api_key: String,
    #[serde(flatten)]
    pub scope: ScopeParameters,
}
