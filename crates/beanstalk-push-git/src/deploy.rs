//! Deploy orchestration.
//!
//! A deploy runs these steps in order, stopping at the first failure:
//!
//! 1. Resolve the reference to a commit and refuse non-commit objects.
//! 2. Canonicalize the repository path for the application, commit and environment.
//! 3. Sign the path for the target endpoint at a single timestamp.
//! 4. Force-push the commit to the target ref through the signed URL.
//!
//! Nothing is written before the push, so a failure at any step leaves no
//! state to roll back.

use beanstalk_push_auth::canonical::build_repository_path;
use beanstalk_push_auth::{Credentials, PushUrl, Signer};
use beanstalk_push_core::{DeploymentTarget, PushConfig};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::commit::{CommitReference, resolve_commit};
use crate::error::DeployError;
use crate::vcs::{PushOutput, VersionControl};

/// Everything needed to push one commit to one environment.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    signer: Signer,
    target: DeploymentTarget,
    reference: Option<String>,
}

impl DeployRequest {
    /// Validate raw inputs into a request.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidCredential`] for an empty access or secret
    /// key and [`DeployError::UnknownRegion`] for a region outside the table.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        application: impl Into<String>,
        environment: Option<String>,
        region: &str,
        reference: Option<String>,
    ) -> Result<Self, DeployError> {
        let credentials = Credentials::new(access_key, secret_key)?;
        let target = DeploymentTarget::new(application, environment, region)?;
        Ok(Self::from_parts(credentials, target, reference))
    }

    /// Build a request from already-validated parts.
    #[must_use]
    pub fn from_parts(
        credentials: Credentials,
        target: DeploymentTarget,
        reference: Option<String>,
    ) -> Self {
        Self {
            signer: Signer::new(credentials),
            target,
            reference,
        }
    }

    /// The deployment target.
    #[must_use]
    pub fn target(&self) -> &DeploymentTarget {
        &self.target
    }

    /// The authenticated URL for pushing `commit_id` at `timestamp`.
    #[must_use]
    pub fn push_url(&self, commit_id: &str, timestamp: DateTime<Utc>) -> PushUrl {
        let path = build_repository_path(
            self.target.application(),
            commit_id,
            self.target.environment(),
        );
        self.signer.push_url(
            self.target.endpoint().host(),
            self.target.region().as_str(),
            &path,
            timestamp,
        )
    }
}

/// The result of a successful deploy.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// The commit that was pushed.
    pub commit: CommitReference,
    /// The URL it was pushed to.
    pub url: PushUrl,
    /// What the push printed.
    pub output: PushOutput,
}

/// Runs deploys through a [`VersionControl`] implementation.
#[derive(Debug, Clone)]
pub struct Deployer<V> {
    vcs: V,
    config: PushConfig,
}

impl<V: VersionControl> Deployer<V> {
    /// Create a deployer that pushes to the configured target ref.
    #[must_use]
    pub fn new(vcs: V, config: &PushConfig) -> Self {
        Self {
            vcs,
            config: config.clone(),
        }
    }

    /// Deploy using the current wall-clock time.
    pub fn deploy(&self, request: &DeployRequest) -> Result<DeployOutcome, DeployError> {
        self.deploy_at(request, Utc::now())
    }

    /// Deploy with an explicit signing timestamp.
    pub fn deploy_at(
        &self,
        request: &DeployRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<DeployOutcome, DeployError> {
        let commit = resolve_commit(&self.vcs, request.reference.as_deref())?;
        let url = request.push_url(&commit.id, timestamp);
        let refspec = self.config.refspec(&commit.id);

        info!(
            commit = %commit.id,
            url = %url,
            refspec,
            "Pushing commit"
        );

        let output = self
            .vcs
            .push(&url.expose(), &refspec)
            .map_err(|e| DeployError::PushFailure {
                code: None,
                message: e.to_string(),
                output: Vec::new(),
            })?;

        if !output.success {
            warn!(code = ?output.code, "git push failed");
            let message = match output.code {
                Some(code) => format!("git push exited with code {code}"),
                None => "git push was terminated by a signal".to_owned(),
            };
            return Err(DeployError::PushFailure {
                code: output.code,
                message,
                output: output.lines,
            });
        }

        info!(commit = %commit.id, "Push completed");
        Ok(DeployOutcome {
            commit,
            url,
            output,
        })
    }
}
