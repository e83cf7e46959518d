//! Deploy error types.
//!
//! Every failure of a deploy falls into one of four kinds, each terminal for
//! the invocation. Callers branch on the variant to pick an exit status.

use beanstalk_push_auth::AuthError;
use beanstalk_push_core::UnknownRegion;

/// Errors that abort a deploy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The access key or secret key was rejected.
    #[error(transparent)]
    InvalidCredential(#[from] AuthError),

    /// The region is not in the region table.
    #[error(transparent)]
    UnknownRegion(#[from] UnknownRegion),

    /// The reference could not be resolved, or does not name a commit.
    #[error("Invalid commit '{reference}': {reason}")]
    InvalidCommit {
        /// The reference that was being resolved.
        reference: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `git push` could not be run or exited unsuccessfully.
    #[error("Push failed: {message}")]
    PushFailure {
        /// The push's exit code, if it exited normally.
        code: Option<i32>,
        /// Description of the failure.
        message: String,
        /// Lines the push printed before failing.
        output: Vec<String>,
    },
}

impl DeployError {
    /// The process exit status this error should produce.
    ///
    /// Push failures propagate git's own non-zero code; everything else is `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PushFailure {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
