//! GitHub API error types

use thiserror::Error;

/// Error types for release and asset operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request or transfer made no progress within the idle limit
    #[error("No progress for {0:?}; giving up")]
    Stalled(std::time::Duration),

    /// Local file system failure (reading an upload, writing a download)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body was not valid JSON, or did not have the expected shape
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status returned by the API
    #[error("GitHub API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, or the raw body
        message: String,
    },

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required or failed (401)
    #[error("Authentication required")]
    AuthRequired,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// `GITHUB_TOKEN` was unset or empty
    #[error("Must set GITHUB_TOKEN environment variable.")]
    MissingToken,

    /// No release satisfied the selector
    #[error("No release found matching {0}")]
    ReleaseNotFound(String),

    /// More than one release satisfied the selector
    #[error("{count} releases match {selector}; expected exactly one")]
    AmbiguousRelease {
        /// Human-readable selector description
        selector: String,
        /// Number of matching releases
        count: usize,
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Spawned task was dropped before producing a result
    #[error("Task channel error: {0}")]
    TaskChannel(#[from] tokio::sync::oneshot::error::RecvError),
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl GitHubError {
    /// True when the error is a 404 from the API
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound(_))
    }
}

impl From<toml::de::Error> for GitHubError {
    fn from(e: toml::de::Error) -> Self {
        GitHubError::Config(e.to_string())
    }
}
