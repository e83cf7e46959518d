//! beanstalk-push - push a git commit to an Elastic Beanstalk environment.
//!
//! The commit is resolved locally, the repository path is signed with a
//! one-time password derived from the access key and secret key, and the
//! commit is force-pushed to the regional git endpoint.
//!
//! # Usage
//!
//! ```text
//! beanstalk-push -i <ACCESS_KEY> -s <SECRET_KEY> -a <APPLICATION> -e <ENVIRONMENT>
//!                -r <REGION> [-c <COMMIT>]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `GIT_BINARY` | `git` | git executable |
//! | `BEANSTALK_PUSH_TARGET_REF` | `refs/heads/master` | Remote ref to update |
//!
//! # Exit Status
//!
//! `0` on success, `1` on invalid input or a commit that cannot be pushed, and
//! git's own exit code when the push itself fails.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use beanstalk_push_core::PushConfig;
use beanstalk_push_git::{DeployError, DeployOutcome, DeployRequest, Deployer, GitCli};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so git's output on stdout is left untouched.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Build the deploy request from parsed arguments.
fn build_request(cli: Cli) -> Result<DeployRequest, DeployError> {
    DeployRequest::new(
        cli.access_key,
        cli.secret_key,
        cli.application,
        Some(cli.environment),
        &cli.region,
        cli.commit,
    )
}

/// Validate the arguments and run the deploy.
fn run(cli: Cli, config: &PushConfig) -> Result<DeployOutcome, DeployError> {
    let request = build_request(cli)?;

    info!(
        application = request.target().application(),
        environment = ?request.target().environment(),
        region = %request.target().region(),
        "starting deploy",
    );

    let deployer = Deployer::new(GitCli::new(&config.git_binary), config);
    deployer.deploy(&request)
}

/// Print git's output lines verbatim.
fn echo(lines: &[String], out: &mut impl Write) {
    for line in lines {
        writeln!(out, "{line}").ok();
    }
}

/// Write the deploy result to `out` and `err` and return the exit status.
///
/// The error message is written to `err` exactly once.
fn report(
    result: Result<DeployOutcome, DeployError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    match result {
        Ok(outcome) => {
            echo(&outcome.output.lines, out);
            0
        }
        Err(error) => {
            if let DeployError::PushFailure { output, .. } = &error {
                echo(output, out);
            }
            debug!(error = %error, "deploy failed");
            writeln!(err, "{error}").ok();
            error.exit_code()
        }
    }
}

fn main() -> ExitCode {
    // Bare invocation prints usage instead of a missing-argument error.
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help().ok();
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();

    let config = match PushConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.log_level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let code = report(run(cli, &config), &mut io::stdout(), &mut io::stderr());
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(region: &str, secret_key: &str) -> Cli {
        Cli {
            access_key: "AKID".to_owned(),
            secret_key: secret_key.to_owned(),
            application: "myapp".to_owned(),
            environment: "prod".to_owned(),
            region: region.to_owned(),
            commit: None,
        }
    }

    #[test]
    fn test_should_build_request_from_cli() {
        let request = build_request(cli("eu-west-1", "secret")).unwrap();
        assert_eq!(request.target().application(), "myapp");
        assert_eq!(request.target().environment(), Some("prod"));
        assert_eq!(
            request.target().endpoint().host(),
            "git.elasticbeanstalk.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_should_fail_before_running_git_for_invalid_input() {
        let config = PushConfig {
            git_binary: "definitely-not-a-git-binary-4f1c".to_owned(),
            ..PushConfig::default()
        };

        let result = run(cli("nowhere-1", "secret"), &config);
        assert!(matches!(result, Err(DeployError::UnknownRegion(_))));

        let result = run(cli("eu-west-1", ""), &config);
        assert!(matches!(result, Err(DeployError::InvalidCredential(_))));
    }

    #[test]
    fn test_should_fail_with_invalid_commit_when_git_is_missing() {
        let config = PushConfig {
            git_binary: "definitely-not-a-git-binary-4f1c".to_owned(),
            ..PushConfig::default()
        };

        let result = run(cli("eu-west-1", "secret"), &config);
        let err = result.unwrap_err();
        assert!(matches!(err, DeployError::InvalidCommit { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_should_report_invalid_input_once_on_stderr() {
        let config = PushConfig::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = report(run(cli("nowhere-1", "secret"), &config), &mut out, &mut err);

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "unknown region: nowhere-1\n");
    }

    #[test]
    fn test_should_echo_push_output_and_propagate_code() {
        let failure = DeployError::PushFailure {
            code: Some(128),
            message: "git push exited with status 128".to_owned(),
            output: vec![
                "remote: denied".to_owned(),
                "fatal: unable to access".to_owned(),
            ],
        };
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = report(Err(failure), &mut out, &mut err);

        assert_eq!(code, 128);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "remote: denied\nfatal: unable to access\n"
        );
        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.lines().count(), 1);
        assert_eq!(err, "Push failed: git push exited with status 128\n");
    }
}
