//! GitHub API client wrapper
//!
//! Binds an HTTP client, a token and one repository together. Operations are
//! exposed as methods that return [`AsyncTask`](crate::runtime::AsyncTask)s.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gh_release_tools::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::builder()
//!         .personal_token("ghp_...")
//!         .repository("tikzit", "tikzit")
//!         .build()?;
//!
//!     for release in gh.list_releases().join().await? {
//!         println!("{} draft={}", release.name(), release.draft);
//!     }
//!     Ok(())
//! }
//! ```

use crate::config::{DEFAULT_API_BASE, DEFAULT_USER_AGENT, ReleaseConfig};
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::gateway::Gateway;
use std::sync::Arc;
use std::time::Duration;

mod releases;

/// GitHub API client bound to one repository.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Gateway>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: client for `config`'s repository authenticated with `token`
    pub fn from_config(config: &ReleaseConfig, token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder()
            .personal_token(token)
            .repository(&config.owner, &config.repo)
            .base_uri(&config.api_base)
            .user_agent(&config.user_agent)
            .idle_timeout(Duration::from_secs(config.timeout_secs))
            .build()
    }

    /// Get the underlying gateway
    #[must_use]
    pub fn inner(&self) -> &Arc<Gateway> {
        &self.inner
    }
}

/// Builder for `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    owner: Option<String>,
    repo: Option<String>,
    base_uri: Option<String>,
    user_agent: Option<String>,
    idle_timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            base_uri: None,
            user_agent: None,
            idle_timeout: None,
            http: None,
        }
    }

    /// Set personal access token for authentication
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the repository every path fragment is resolved against
    #[must_use]
    pub fn repository(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self.repo = Some(repo.into());
        self
    }

    /// Set base URI (for GitHub Enterprise or a local test server)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Set the `User-Agent` header value
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Give up on a connection attempt, a response or a body transfer that
    /// makes no progress for `timeout`. There is no cap on total duration.
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client; `user_agent` and the connect timeout
    /// are then left to it. The idle timeout still applies.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the `GitHubClient`.
    ///
    /// Fails with [`GitHubError::MissingToken`] when no non-empty token was
    /// supplied; no request is made in that case.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(GitHubError::MissingToken)?;

        let (owner, repo) = match (self.owner, self.repo) {
            (Some(o), Some(r)) if !o.is_empty() && !r.is_empty() => (o, r),
            _ => {
                return Err(GitHubError::ClientSetup(
                    "repository owner and name are required".into(),
                ));
            }
        };

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));
                if let Some(timeout) = self.idle_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| GitHubError::ClientSetup(e.to_string()))?
            }
        };

        let base = self.base_uri.as_deref().unwrap_or(DEFAULT_API_BASE);
        let gateway = Gateway::new(http, base, &owner, &repo, token, self.idle_timeout);

        Ok(GitHubClient {
            inner: Arc::new(gateway),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
