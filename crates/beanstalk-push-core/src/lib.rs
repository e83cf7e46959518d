//! Core types and configuration for beanstalk-push.
//!
//! This crate provides the pieces shared by the signer, the git collaborator
//! and the CLI: the static region table, the deployment target a push is
//! addressed to, and environment-driven configuration.

mod config;
mod error;
mod types;

pub use config::PushConfig;
pub use error::{CoreError, UnknownRegion};
pub use types::{DeploymentTarget, Region, ServiceEndpoint};
