//! Configuration management for beanstalk-push.
//!
//! All configuration is driven by environment variables.

use crate::error::CoreError;

/// Runtime configuration for a push.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// The git executable.
    pub git_binary: String,
    /// Remote ref the commit is force-pushed to.
    pub target_ref: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            git_binary: "git".to_owned(),
            target_ref: "refs/heads/master".to_owned(),
        }
    }
}

impl PushConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `BEANSTALK_PUSH_TARGET_REF` is blank.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CoreError> {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("GIT_BINARY") {
            config.git_binary = v;
        }
        if let Some(v) = lookup("BEANSTALK_PUSH_TARGET_REF") {
            if v.trim().is_empty() {
                return Err(CoreError::Config(
                    "BEANSTALK_PUSH_TARGET_REF must not be blank".to_owned(),
                ));
            }
            config.target_ref = v;
        }

        tracing::trace!(?config, "loaded push configuration");
        Ok(config)
    }

    /// The refspec that force-updates the target ref with `commit_id`.
    #[must_use]
    pub fn refspec(&self, commit_id: &str) -> String {
        format!("{commit_id}:{}", self.target_ref)
    }
}
