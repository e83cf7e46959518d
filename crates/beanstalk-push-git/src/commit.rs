//! Commit resolution.
//!
//! The reference to deploy is resolved through the version-control tool and
//! must name a commit object. Trees, blobs and tags are refused before any
//! path is built or anything is pushed.

use tracing::debug;

use crate::error::DeployError;
use crate::vcs::{ObjectType, VersionControl};

/// The reference deployed when none is given.
pub const DEFAULT_REFERENCE: &str = "HEAD";

/// A resolved commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReference {
    /// The concrete object id.
    pub id: String,
    /// The object type reported for `id`.
    pub object_type: ObjectType,
}

/// Resolve `reference` (default `HEAD`) to a commit.
///
/// # Errors
///
/// Returns [`DeployError::InvalidCommit`] if the reference starts with `-`,
/// cannot be resolved, its type cannot be read, or it is not a commit.
pub fn resolve_commit(
    vcs: &dyn VersionControl,
    reference: Option<&str>,
) -> Result<CommitReference, DeployError> {
    let reference = reference
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_REFERENCE);

    let invalid = |reason: String| DeployError::InvalidCommit {
        reference: reference.to_owned(),
        reason,
    };

    if reference.starts_with('-') {
        return Err(invalid("references must not start with '-'".to_owned()));
    }

    let id = vcs.resolve(reference).map_err(|e| invalid(e.to_string()))?;
    let object_type = vcs.object_type(&id).map_err(|e| invalid(e.to_string()))?;

    debug!(reference, id = %id, object_type = %object_type, "Resolved reference");

    if object_type != ObjectType::Commit {
        return Err(invalid(format!("{id} is a {object_type}, not a commit")));
    }

    Ok(CommitReference { id, object_type })
}
