//! Reportcam Signing Library
//!
//! Mints [`SignedUploadAuthorization`](reportcam_core::SignedUploadAuthorization) values:
//! the fixed upload policy plus the instant of issuance, signed with the server-only API
//! secret using the media host's verification rule (see [`canonical`]).

pub mod canonical;
pub mod clock;
pub mod error;
pub mod issuer;

pub use canonical::{digest_hex, string_to_sign};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SigningError;
pub use issuer::SignatureIssuer;
