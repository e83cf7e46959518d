//! String to sign and signing key derivation.
//!
//! This module implements the two SigV4-shaped stages between the canonical
//! request hash and the final password:
//!
//! 1. Build the string to sign from the timestamp, credential scope and canonical
//!    request hash.
//! 2. Derive the signing key by chaining HMAC-SHA256 over the scope components,
//!    seeded from the secret key.
//!
//! The service and terminator components of the scope are fixed for the git
//! deployment protocol.

use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use tracing::debug;

/// The signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// The service component of the credential scope.
pub const SERVICE: &str = "devtools";

/// The terminating component of the credential scope.
pub const TERMINATOR: &str = "aws4_request";

type HmacSha256 = Hmac<Sha256>;

/// The four-part credential scope a signing key is bound to.
///
/// Components are, in order: the UTC date (`YYYYMMDD`), the region, the fixed
/// service name and the fixed terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningScope {
    date: String,
    region: String,
}

impl SigningScope {
    /// Build the scope for a signing timestamp and region.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanstalk_push_auth::sigv4::SigningScope;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let timestamp = Utc.with_ymd_and_hms(2015, 1, 1, 12, 30, 0).unwrap();
    /// let scope = SigningScope::new(timestamp, "us-east-1");
    /// assert_eq!(scope.to_string(), "20150101/us-east-1/devtools/aws4_request");
    /// ```
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, region: impl Into<String>) -> Self {
        Self {
            date: timestamp.format("%Y%m%d").to_string(),
            region: region.into(),
        }
    }

    /// The scope components in chaining order.
    #[must_use]
    pub fn components(&self) -> [&str; 4] {
        [self.date.as_str(), self.region.as_str(), SERVICE, TERMINATOR]
    }
}

impl std::fmt::Display for SigningScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.components().join("/"))
    }
}

/// Format a timestamp as `YYYYMMDDTHHMMSS` (UTC, no trailing `Z`).
#[must_use]
pub fn format_request_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%S").to_string()
}

/// Build the string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <YYYYMMDDTHHMMSS>\n
/// <scope joined with '/'>\n
/// <canonical_request_hash>
/// ```
///
/// # Examples
///
/// ```
/// use beanstalk_push_auth::sigv4::build_string_to_sign;
/// use chrono::{TimeZone, Utc};
///
/// let timestamp = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
/// let sts = build_string_to_sign(
///     timestamp,
///     &["20150101", "us-east-1", "devtools", "aws4_request"],
///     "863b1d33c549642a477da3d7c54ffdd9eb1c4f6d56ad7d877389fb61e829532b",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20150101T000000\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: DateTime<Utc>,
    scope: &[&str],
    canonical_request_hash: &str,
) -> String {
    let datetime = format_request_datetime(timestamp);
    let scope = scope.join("/");
    let string_to_sign = format!("{ALGORITHM}\n{datetime}\n{scope}\n{canonical_request_hash}");
    debug!(string_to_sign, "Built string to sign");
    string_to_sign
}

/// Derive the signing key by chaining HMAC-SHA256 over `scope`.
///
/// ```text
/// k0 = "AWS4" + secret_key
/// kN = HMAC-SHA256(kN-1, scope[N-1])
/// ```
///
/// Each step produces raw bytes that key the next step. With the standard
/// four-part scope the result is the 32-byte signing key.
///
/// # Examples
///
/// ```
/// use beanstalk_push_auth::sigv4::derive_signing_key;
///
/// let key = derive_signing_key("secret", &["20150101", "us-east-1", "devtools", "aws4_request"]);
/// assert_eq!(key.len(), 32);
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, scope: &[&str]) -> Vec<u8> {
    scope.iter().fold(
        format!("AWS4{secret_key}").into_bytes(),
        |key, component| hmac_sha256(&key, component.as_bytes()),
    )
}

/// Compute the HMAC-SHA256 signature of `data` using the given `signing_key`.
///
/// Returns the hex-encoded signature.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
