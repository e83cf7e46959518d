//! [`VersionControl`] backed by the `git` executable.

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::{debug, trace};

use crate::vcs::{ObjectType, PushOutput, VcsError, VersionControl};

/// Runs the local `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
    work_dir: Option<PathBuf>,
}

impl GitCli {
    /// Use `binary` as the git executable.
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            work_dir: None,
        }
    }

    /// Run git inside `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    fn output(&self, args: &[&str]) -> Result<Output, VcsError> {
        let mut command = Command::new(&self.binary);
        command.args(args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        command.output().map_err(|source| VcsError::Spawn {
            program: self.binary.clone(),
            source,
        })
    }

    /// Run a query command and return its trimmed stdout.
    fn read(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                command: format!("{} {}", self.binary, args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        trace!(?args, stdout, "git query");
        Ok(stdout)
    }
}

impl VersionControl for GitCli {
    fn resolve(&self, reference: &str) -> Result<String, VcsError> {
        self.read(&["rev-parse", "--verify", "--end-of-options", reference])
    }

    fn object_type(&self, id: &str) -> Result<ObjectType, VcsError> {
        self.read(&["cat-file", "-t", id]).map(|name| ObjectType::parse(&name))
    }

    fn push(&self, remote_url: &str, refspec: &str) -> Result<PushOutput, VcsError> {
        debug!(refspec, "Running git push");
        let output = self.output(&["push", "-f", remote_url, refspec])?;

        let lines = [&output.stdout, &output.stderr]
            .into_iter()
            .flat_map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .lines()
                    .map(ToOwned::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(PushOutput {
            success: output.status.success(),
            code: output.status.code(),
            lines,
        })
    }
}
