//! GitHub API operations module
//!
//! Release and release-asset operations over an authenticated REST gateway.

pub mod client;
pub mod error;
pub mod gateway;
pub mod models;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use util::{matches_filter, spawn_task};

pub use gateway::{ApiRequest, Gateway};
pub use models::{Asset, Release};
pub use upload_release_asset::{UploadAssetOptions, expand_upload_url};

// GitHub API operations - Releases (internal)
pub(crate) mod delete_release_asset;
pub(crate) mod download_release_asset;
pub(crate) mod list_releases;
pub mod upload_release_asset;
