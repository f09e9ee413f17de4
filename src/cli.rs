//! Shared command-line plumbing for the `gh-*` binaries.

use crate::config::{CONFIG_ENV, ReleaseConfig, token_from_env};
use crate::github::GitHubClient;
use crate::release::ReleaseSelector;
use anyhow::{Context, Result};
use clap::Args;
use log::{Level, error, log_enabled};
use std::future::Future;
use std::path::PathBuf;

/// Repository and release selection flags common to every GitHub tool
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Path to configuration file (default: ./gh-release.toml if present)
    #[arg(long, short = 'c', env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Select the draft release
    #[arg(long, conflicts_with = "release")]
    pub draft: bool,

    /// Select the release with this exact name
    #[arg(long)]
    pub release: Option<String>,
}

impl RepoArgs {
    /// Load the config file and apply flag overrides.
    pub fn load_config(&self) -> Result<ReleaseConfig> {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        let mut config = ReleaseConfig::load(self.config.as_deref(), &cwd)
            .context("Failed to load configuration")?;

        if let Some(owner) = &self.owner {
            config.owner.clone_from(owner);
        }
        if let Some(repo) = &self.repo {
            config.repo.clone_from(repo);
        }
        if let Some(release) = &self.release {
            config.release.clone_from(release);
            config.draft = false;
        }
        if self.draft {
            config.draft = true;
        }
        Ok(config)
    }

    /// Resolve the token, then load config and build the client.
    ///
    /// The token is checked first so a missing credential stops the tool
    /// before anything else happens.
    pub fn connect(&self) -> Result<Connection> {
        let token = token_from_env()?;
        let config = self.load_config()?;
        let client =
            GitHubClient::from_config(&config, token.clone()).context("Failed to create GitHub client")?;
        Ok(Connection {
            selector: config.selector(),
            client,
            token,
        })
    }
}

/// Everything a tool needs after startup
#[derive(Clone)]
pub struct Connection {
    pub client: GitHubClient,
    pub selector: ReleaseSelector,
    pub token: String,
}

/// Initialise `env_logger` at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Report a fatal error and exit 1.
///
/// Goes through the logger when error records are enabled, straight to
/// stderr otherwise, so the message survives `RUST_LOG=off`.
pub fn fail(message: impl std::fmt::Display) -> ! {
    if log_enabled!(Level::Error) {
        error!("{message}");
    } else {
        eprintln!("{message}");
    }
    std::process::exit(1);
}

/// Run `fut` to completion on a fresh runtime; exit 1 on error.
pub fn run<F>(fut: F)
where
    F: Future<Output = Result<()>>,
{
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => fail(format!("FATAL: Failed to create Tokio runtime: {e}")),
    };
    if let Err(e) = rt.block_on(fut) {
        fail(format!("{e:#}"));
    }
}
