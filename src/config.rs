//! Configuration for the release tools
//!
//! Values come from an optional TOML file layered over built-in defaults;
//! command-line flags override both. The credential is not part of the file:
//! it is resolved once from `GITHUB_TOKEN` and handed to the client builder.

use crate::editor::EditorConfig;
use crate::github::error::{GitHubError, GitHubResult};
use crate::release::ReleaseSelector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "GH_RELEASE_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gh-release.toml";

/// Public GitHub REST endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// `User-Agent` sent with every request (GitHub rejects requests without one)
pub const DEFAULT_USER_AGENT: &str = concat!("gh-release-tools/", env!("CARGO_PKG_VERSION"));

/// Repository and selection settings shared by `gh-get`, `gh-list` and `gh-push`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub owner: String,
    pub repo: String,
    pub api_base: String,
    pub user_agent: String,
    /// Seconds a request may go without progress; transfers have no total cap
    pub timeout_secs: u64,
    /// Name of the staging release
    pub release: String,
    /// Select the draft release instead of the named one
    pub draft: bool,
    pub editor: EditorConfig,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            owner: "tikzit".to_string(),
            repo: "tikzit".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 300,
            release: "AUTO".to_string(),
            draft: false,
            editor: EditorConfig::default(),
        }
    }
}

impl ReleaseConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> GitHubResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> GitHubResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GitHubError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] in `dir`
    /// when it exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> GitHubResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Release selection policy implied by this config
    #[must_use]
    pub fn selector(&self) -> ReleaseSelector {
        if self.draft {
            ReleaseSelector::Draft
        } else {
            ReleaseSelector::Named(self.release.clone())
        }
    }
}

/// Validate a raw token value; empty or missing is an error.
pub fn resolve_token(raw: Option<String>) -> GitHubResult<String> {
    match raw {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(GitHubError::MissingToken),
    }
}

/// Read [`TOKEN_ENV`] once. Call this at process start only.
pub fn token_from_env() -> GitHubResult<String> {
    resolve_token(std::env::var(TOKEN_ENV).ok())
}
