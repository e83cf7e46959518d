//! The version-control collaborator interface.

use std::fmt;

/// A git object type as reported by `git cat-file -t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectType {
    /// A commit object.
    Commit,
    /// A tree object.
    Tree,
    /// A blob object.
    Blob,
    /// An annotated tag object.
    Tag,
    /// Any other type string.
    Other(String),
}

impl ObjectType {
    /// Parse the type name printed by git.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "commit" => Self::Commit,
            "tree" => Self::Tree,
            "blob" => Self::Blob,
            "tag" => Self::Tag,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a push reported back.
///
/// The output is plain text; nothing beyond the exit status is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOutput {
    /// Whether the push exited successfully.
    pub success: bool,
    /// The exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Lines the push printed, stdout first, then stderr.
    pub lines: Vec<String>,
}

/// A failed version-control invocation.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and reported failure.
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        /// The command line that was run, minus credentials.
        command: String,
        /// The exit status description.
        status: String,
        /// What the tool printed on stderr.
        stderr: String,
    },
}

/// Operations the deploy needs from the local version-control tool.
pub trait VersionControl {
    /// Resolve `reference` to a concrete object id.
    fn resolve(&self, reference: &str) -> Result<String, VcsError>;

    /// Report the object type of `id`.
    fn object_type(&self, id: &str) -> Result<ObjectType, VcsError>;

    /// Push `refspec` to `remote_url`, force-updating the remote ref.
    ///
    /// A push that runs but fails is reported through [`PushOutput::success`];
    /// `Err` means the push could not be run at all.
    fn push(&self, remote_url: &str, refspec: &str) -> Result<PushOutput, VcsError>;
}
