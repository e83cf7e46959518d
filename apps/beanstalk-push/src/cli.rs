//! Command-line arguments.

use clap::Parser;

/// Push a git commit to an Elastic Beanstalk environment.
///
/// The push is authenticated with a one-time password derived from the
/// access key and secret key; the secret key itself is never sent.
#[derive(Debug, Parser)]
#[command(name = "beanstalk-push", version)]
pub struct Cli {
    /// Access key ID.
    #[arg(short = 'i', value_name = "ACCESS_KEY")]
    pub access_key: String,

    /// Secret access key.
    #[arg(short = 's', value_name = "SECRET_KEY")]
    pub secret_key: String,

    /// Application name.
    #[arg(short = 'a', value_name = "APPLICATION")]
    pub application: String,

    /// Environment name.
    #[arg(short = 'e', value_name = "ENVIRONMENT")]
    pub environment: String,

    /// Region, e.g. us-east-1.
    #[arg(short = 'r', value_name = "REGION")]
    pub region: String,

    /// Commit to push (defaults to HEAD).
    #[arg(short = 'c', value_name = "COMMIT")]
    pub commit: Option<String>,
}
