//! Commit resolution and authenticated push for beanstalk-push.
//!
//! This crate connects the signer to the local `git` binary: it resolves the
//! commit to deploy, refuses anything that is not a commit object, signs the
//! repository path for the target endpoint and force-pushes the commit.
//!
//! The [`VersionControl`] trait is the seam to the external tool; [`GitCli`]
//! implements it by spawning `git`, and tests substitute an in-memory fake.

pub mod commit;
pub mod deploy;
pub mod error;
#[cfg(test)]
mod fake;
pub mod git_cli;
pub mod vcs;

pub use commit::{CommitReference, resolve_commit};
pub use deploy::{DeployOutcome, DeployRequest, Deployer};
pub use error::DeployError;
pub use git_cli::GitCli;
pub use vcs::{ObjectType, PushOutput, VcsError, VersionControl};
