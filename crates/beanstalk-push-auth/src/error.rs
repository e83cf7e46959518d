//! Error types for password derivation.

/// Errors that can occur while preparing to sign a push.
///
/// The signing computation itself is total; only credential construction can fail.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// An access key or secret key was empty.
    #[error("Invalid credential: {0} must not be empty")]
    InvalidCredential(&'static str),
}
