//! Repository path and canonical request construction.
//!
//! The canonical request for a git push has a fixed shape:
//!
//! ```text
//! GIT\n
//! CanonicalPath\n
//! \n
//! host:<endpoint>\n
//! \n
//! host\n
//! ```
//!
//! That is: the `GIT` method literal, the path, an empty query string, a single
//! canonical `host` header, an empty payload hash placeholder and the signed
//! header list. The server rebuilds the same string byte for byte.

use sha2::{Digest, Sha256};

/// Build the repository path for a push.
///
/// Every segment is the lowercase hex encoding of the raw bytes of its source
/// string, so slashes, spaces and non-ASCII characters never leak into the
/// path structure. The environment segment is appended only when present and
/// non-empty.
///
/// # Examples
///
/// ```
/// use beanstalk_push_auth::canonical::build_repository_path;
///
/// assert_eq!(
///     build_repository_path("myapp", "ab", Some("prod")),
///     "/v1/repos/6d79617070/commitid/6162/environment/70726f64"
/// );
/// assert_eq!(
///     build_repository_path("myapp", "ab", None),
///     "/v1/repos/6d79617070/commitid/6162"
/// );
/// ```
#[must_use]
pub fn build_repository_path(
    application: &str,
    commit_id: &str,
    environment: Option<&str>,
) -> String {
    let mut path = format!(
        "/v1/repos/{}/commitid/{}",
        hex_segment(application),
        hex_segment(commit_id)
    );

    if let Some(environment) = environment.filter(|env| !env.is_empty()) {
        path.push_str("/environment/");
        path.push_str(&hex_segment(environment));
    }

    path
}

/// Build the canonical request string for `path` on `host`.
///
/// # Examples
///
/// ```
/// use beanstalk_push_auth::canonical::build_canonical_request;
///
/// let canonical = build_canonical_request("/v1/repos/61", "example.com");
/// assert_eq!(canonical, "GIT\n/v1/repos/61\n\nhost:example.com\n\nhost\n");
/// ```
#[must_use]
pub fn build_canonical_request(path: &str, host: &str) -> String {
    format!("GIT\n{path}\n\nhost:{host}\n\nhost\n")
}

/// Hash the canonical request for `path` on `host`.
///
/// Returns the lowercase hex SHA-256 digest that anchors the string to sign.
#[must_use]
pub fn hash_canonical_request(path: &str, host: &str) -> String {
    let canonical_request = build_canonical_request(path, host);
    tracing::debug!(canonical_request, "Built canonical request");
    hex::encode(Sha256::digest(canonical_request.as_bytes()))
}

/// Hex-encode a single path segment.
fn hex_segment(input: &str) -> String {
    hex::encode(input.as_bytes())
}
