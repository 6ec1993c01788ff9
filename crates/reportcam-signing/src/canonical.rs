//! Canonical request signing.
//!
//! The media host verifies a signature by rebuilding it the same way:
//! parameters with empty values are dropped, the rest are sorted by name, rendered as
//! `name=value` and joined with `&`, then the API secret is appended with no separator
//! and the whole string is hashed and hex encoded.

use reportcam_core::SignatureAlgorithm;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Build the string the digest is computed over, without the secret.
pub fn string_to_sign<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let sorted: BTreeMap<&str, String> = params
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();

    sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hash `to_sign` followed by `secret` and return the lowercase hex digest.
pub fn digest_hex(to_sign: &str, secret: &str, algorithm: SignatureAlgorithm) -> String {
    match algorithm {
        SignatureAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(to_sign.as_bytes());
            hasher.update(secret.as_bytes());
            hex::encode(hasher.finalize())
        }
        SignatureAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(to_sign.as_bytes());
            hasher.update(secret.as_bytes());
            hex::encode(hasher.finalize())
        }
    }
}
