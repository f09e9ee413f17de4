//! Release staging workflow
//!
//! Locates the staging release and synchronizes its assets with the local
//! working directory. Everything here talks to GitHub through [`ReleaseApi`],
//! which [`GitHubClient`](crate::GitHubClient) implements.

use crate::github::error::GitHubResult;
use crate::github::models::{Asset, Release};
use bytes::Bytes;
use std::path::Path;

pub mod assets;
pub mod locator;

pub use assets::{DownloadedAsset, download_assets, list_asset_urls, push_asset, with_access_token};
pub use locator::{ReleaseSelector, find_release, locate_release};

/// The release operations the staging workflow needs.
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    /// Fetch the release listing in API order
    async fn list_releases(&self) -> GitHubResult<Vec<Release>>;

    /// Delete one asset by ID
    async fn delete_asset(&self, asset_id: u64) -> GitHubResult<()>;

    /// Upload `content` as asset `name` of `release`
    async fn upload_asset(&self, release: &Release, name: &str, content: Bytes)
    -> GitHubResult<Asset>;

    /// Write the asset's content to `dest`, returning the byte count
    async fn download_asset(&self, asset: &Asset, dest: &Path) -> GitHubResult<u64>;
}
