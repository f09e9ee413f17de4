//! `gh_release_tools` - release staging helpers for a GitHub repository
//!
//! Lists, downloads and replace-uploads the assets of a staging release
//! (the draft, or a release with a fixed name such as `AUTO`) through the
//! GitHub REST API. Also carries the small editor dispatcher used to jump
//! from a `FILE LINE` pair into the right tool.

pub mod cli;
pub mod config;
pub mod editor;
pub mod github;
pub mod release;
pub mod runtime;

// Re-export runtime types
pub use runtime::AsyncTask;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export models and operation options
pub use github::{ApiRequest, Asset, Release, UploadAssetOptions, expand_upload_url};

// Re-export the staging workflow
pub use release::{
    DownloadedAsset, ReleaseApi, ReleaseSelector, download_assets, find_release,
    list_asset_urls, locate_release, push_asset,
};

pub use config::ReleaseConfig;
pub use editor::{EditorConfig, Launch, Launcher, SystemLauncher};
