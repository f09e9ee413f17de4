//! Releases and release assets API methods

use super::GitHubClient;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::{Asset, Release};
use crate::github::upload_release_asset::UploadAssetOptions;
use crate::release::ReleaseApi;
use crate::runtime::AsyncTask;
use bytes::Bytes;
use std::path::{Path, PathBuf};

impl GitHubClient {
    /// List the repository's releases (first page only)
    #[must_use]
    pub fn list_releases(&self) -> AsyncTask<Result<Vec<Release>, GitHubError>> {
        crate::github::list_releases::list_releases(self.inner.clone())
    }

    /// Delete a release asset
    #[must_use]
    pub fn delete_release_asset(&self, asset_id: u64) -> AsyncTask<Result<(), GitHubError>> {
        crate::github::delete_release_asset::delete_release_asset(self.inner.clone(), asset_id)
    }

    /// Upload an asset to a release
    ///
    /// Posts the binary content to the release's upload URL.
    /// Returns the uploaded asset information including download URL.
    #[must_use]
    pub fn upload_release_asset(
        &self,
        options: UploadAssetOptions,
    ) -> AsyncTask<Result<Asset, GitHubError>> {
        crate::github::upload_release_asset::upload_release_asset(self.inner.clone(), options)
    }

    /// Download a release asset's content into `dest`
    pub fn download_release_asset(
        &self,
        asset_id: u64,
        dest: impl Into<PathBuf>,
    ) -> AsyncTask<Result<u64, GitHubError>> {
        crate::github::download_release_asset::download_release_asset(
            self.inner.clone(),
            asset_id,
            dest.into(),
        )
    }
}

impl ReleaseApi for GitHubClient {
    async fn list_releases(&self) -> GitHubResult<Vec<Release>> {
        GitHubClient::list_releases(self).join().await
    }

    async fn delete_asset(&self, asset_id: u64) -> GitHubResult<()> {
        self.delete_release_asset(asset_id).join().await
    }

    async fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        content: Bytes,
    ) -> GitHubResult<Asset> {
        self.upload_release_asset(UploadAssetOptions {
            upload_url: release.upload_url.clone(),
            asset_name: name.to_string(),
            label: None,
            content,
        })
        .join()
        .await
    }

    async fn download_asset(&self, asset: &Asset, dest: &Path) -> GitHubResult<u64> {
        self.download_release_asset(asset.id, dest).join().await
    }
}
